//! Typed project configuration for Mason.
//!
//! The wizard (or a JSON document on stdin) fills in a [`ProjectConfig`];
//! [`ProjectConfig::placeholders`] is the single place where the flat
//! `{{KEY}}` -> value mapping consumed by the materialization engine is
//! constructed. Discriminators are closed enums so an unrecognized value
//! can never silently fall through a string match.

use chrono::Local;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Flat mapping of placeholder keys to their replacement values.
pub type Placeholders = IndexMap<String, String>;

/// Backend technology discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendTech {
    Fastapi,
    Django,
    Express,
}

impl BackendTech {
    pub const ALL: [BackendTech; 3] =
        [BackendTech::Fastapi, BackendTech::Django, BackendTech::Express];

    /// Wire value, also the skeleton directory name under `backend/skeleton/`.
    pub fn value(self) -> &'static str {
        match self {
            BackendTech::Fastapi => "fastapi",
            BackendTech::Django => "django",
            BackendTech::Express => "express",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackendTech::Fastapi => "FastAPI (Python, fast, async-ready)",
            BackendTech::Django => "Django (Python, batteries included, admin UI)",
            BackendTech::Express => "Express (Node.js, lightweight, one language)",
        }
    }

    /// Development server command substituted into docker-compose.
    pub fn dev_command(self) -> &'static str {
        match self {
            BackendTech::Fastapi => {
                "uvicorn app.main:app --host 0.0.0.0 --port 8000 --reload"
            }
            BackendTech::Django => "python manage.py runserver 0.0.0.0:8000",
            BackendTech::Express => "npm run dev",
        }
    }
}

/// Frontend technology discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontendTech {
    Nextjs,
    React,
    Vue,
}

impl FrontendTech {
    pub const ALL: [FrontendTech; 3] =
        [FrontendTech::Nextjs, FrontendTech::React, FrontendTech::Vue];

    pub fn value(self) -> &'static str {
        match self {
            FrontendTech::Nextjs => "nextjs",
            FrontendTech::React => "react",
            FrontendTech::Vue => "vue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FrontendTech::Nextjs => "Next.js (React, SSR, App Router)",
            FrontendTech::React => "React (SPA, Vite)",
            FrontendTech::Vue => "Vue.js (SPA, Composition API)",
        }
    }

    pub fn dev_command(self) -> &'static str {
        match self {
            FrontendTech::Nextjs => "npm run dev",
            FrontendTech::React => "npm start",
            FrontendTech::Vue => "npm run dev",
        }
    }
}

/// Database discriminator with the docker-compose settings derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatabaseType {
    Postgresql,
    Mysql,
    Sqlite,
    Other,
}

impl DatabaseType {
    pub const ALL: [DatabaseType; 4] = [
        DatabaseType::Postgresql,
        DatabaseType::Mysql,
        DatabaseType::Sqlite,
        DatabaseType::Other,
    ];

    pub fn value(self) -> &'static str {
        match self {
            DatabaseType::Postgresql => "postgresql",
            DatabaseType::Mysql => "mysql",
            DatabaseType::Sqlite => "sqlite",
            DatabaseType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatabaseType::Postgresql => "PostgreSQL (recommended for production)",
            DatabaseType::Mysql => "MySQL (high compatibility)",
            DatabaseType::Sqlite => "SQLite (development only)",
            DatabaseType::Other => "Other (configure manually)",
        }
    }

    pub fn image(self) -> &'static str {
        match self {
            DatabaseType::Postgresql | DatabaseType::Other => "postgres:15-alpine",
            DatabaseType::Mysql => "mysql:8.0",
            DatabaseType::Sqlite => "alpine:latest",
        }
    }

    pub fn port(self) -> &'static str {
        match self {
            DatabaseType::Postgresql | DatabaseType::Other => "5432",
            DatabaseType::Mysql => "3306",
            DatabaseType::Sqlite => "0",
        }
    }

    pub fn volume_name(self) -> &'static str {
        match self {
            DatabaseType::Postgresql => "postgres_data",
            DatabaseType::Mysql => "mysql_data",
            DatabaseType::Sqlite => "sqlite_data",
            DatabaseType::Other => "db_data",
        }
    }

    pub fn volume_path(self) -> &'static str {
        match self {
            DatabaseType::Postgresql | DatabaseType::Other => "/var/lib/postgresql/data",
            DatabaseType::Mysql => "/var/lib/mysql",
            DatabaseType::Sqlite => "/data",
        }
    }

    /// Docker-compose environment block for the database service.
    /// Credentials are expanded here; the engine never re-scans values.
    pub fn env_block(self, creds: &DatabaseCredentials) -> String {
        match self {
            DatabaseType::Postgresql => format!(
                "\n      - POSTGRES_DB={}\n      - POSTGRES_USER={}\n      - POSTGRES_PASSWORD={}",
                creds.name, creds.user, creds.password
            ),
            DatabaseType::Mysql => format!(
                "\n      - MYSQL_DATABASE={}\n      - MYSQL_USER={}\n      - MYSQL_PASSWORD={}\n      - MYSQL_ROOT_PASSWORD={}",
                creds.name, creds.user, creds.password, creds.password
            ),
            DatabaseType::Sqlite => String::new(),
            DatabaseType::Other => "# configure manually".to_string(),
        }
    }

    /// Connection URL substituted into backend environment templates.
    pub fn url(self, creds: &DatabaseCredentials) -> String {
        match self {
            DatabaseType::Postgresql => format!(
                "postgresql://{}:{}@db:5432/{}",
                creds.user, creds.password, creds.name
            ),
            DatabaseType::Mysql => format!(
                "mysql://{}:{}@db:3306/{}",
                creds.user, creds.password, creds.name
            ),
            DatabaseType::Sqlite => format!("sqlite:///./{}.db", creds.name),
            DatabaseType::Other => "# configure manually".to_string(),
        }
    }
}

/// ORM choice, asked only when the backend is Express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpressOrm {
    Prisma,
    Typeorm,
    Sequelize,
}

impl ExpressOrm {
    pub const ALL: [ExpressOrm; 3] =
        [ExpressOrm::Prisma, ExpressOrm::Typeorm, ExpressOrm::Sequelize];

    pub fn value(self) -> &'static str {
        match self {
            ExpressOrm::Prisma => "prisma",
            ExpressOrm::Typeorm => "typeorm",
            ExpressOrm::Sequelize => "sequelize",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpressOrm::Prisma => "Prisma (modern, type-safe, recommended)",
            ExpressOrm::Typeorm => "TypeORM (full-featured, decorators)",
            ExpressOrm::Sequelize => "Sequelize (established, battle-tested)",
        }
    }
}

/// Frontend hosting target. `Tbd` is the "decide later" sentinel:
/// no deployment subtree is materialized for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontendHosting {
    Vercel,
    Netlify,
    Aws,
    SelfHosted,
    Tbd,
}

impl FrontendHosting {
    pub const ALL: [FrontendHosting; 5] = [
        FrontendHosting::Vercel,
        FrontendHosting::Netlify,
        FrontendHosting::Aws,
        FrontendHosting::SelfHosted,
        FrontendHosting::Tbd,
    ];

    pub fn value(self) -> &'static str {
        match self {
            FrontendHosting::Vercel => "vercel",
            FrontendHosting::Netlify => "netlify",
            FrontendHosting::Aws => "aws",
            FrontendHosting::SelfHosted => "self-hosted",
            FrontendHosting::Tbd => "tbd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FrontendHosting::Vercel => "Vercel (best for Next.js, free tier)",
            FrontendHosting::Netlify => "Netlify (static sites, free tier)",
            FrontendHosting::Aws => "AWS (S3 + CloudFront, flexible)",
            FrontendHosting::SelfHosted => "Self-hosted (Docker)",
            FrontendHosting::Tbd => "Not decided yet",
        }
    }

    /// Deployment variant directory name, `None` for the `tbd` sentinel.
    pub fn deploy_dir(self) -> Option<&'static str> {
        match self {
            FrontendHosting::Tbd => None,
            other => Some(other.value()),
        }
    }
}

/// Backend hosting target, with the same `Tbd` sentinel semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendHosting {
    Aws,
    Gcp,
    Heroku,
    Render,
    SelfHosted,
    Tbd,
}

impl BackendHosting {
    pub const ALL: [BackendHosting; 6] = [
        BackendHosting::Aws,
        BackendHosting::Gcp,
        BackendHosting::Heroku,
        BackendHosting::Render,
        BackendHosting::SelfHosted,
        BackendHosting::Tbd,
    ];

    pub fn value(self) -> &'static str {
        match self {
            BackendHosting::Aws => "aws",
            BackendHosting::Gcp => "gcp",
            BackendHosting::Heroku => "heroku",
            BackendHosting::Render => "render",
            BackendHosting::SelfHosted => "self-hosted",
            BackendHosting::Tbd => "tbd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackendHosting::Aws => "AWS (EC2/ECS, production-grade)",
            BackendHosting::Gcp => "GCP (Cloud Run, container-friendly)",
            BackendHosting::Heroku => "Heroku (simple deploys, paid)",
            BackendHosting::Render => "Render (simple deploys, free tier)",
            BackendHosting::SelfHosted => "Self-hosted (Docker)",
            BackendHosting::Tbd => "Not decided yet",
        }
    }

    pub fn deploy_dir(self) -> Option<&'static str> {
        match self {
            BackendHosting::Tbd => None,
            other => Some(other.value()),
        }
    }
}

/// Memory-tier discriminator. Each tier is a strict superset of the
/// previous tier's file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryTier {
    Tier1,
    Tier2,
    Tier3,
}

impl MemoryTier {
    pub const ALL: [MemoryTier; 3] =
        [MemoryTier::Tier1, MemoryTier::Tier2, MemoryTier::Tier3];

    pub fn value(self) -> &'static str {
        match self {
            MemoryTier::Tier1 => "tier1",
            MemoryTier::Tier2 => "tier2",
            MemoryTier::Tier3 => "tier3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemoryTier::Tier1 => "Tier 1 - small (3 files, solo, 1-2 weeks)",
            MemoryTier::Tier2 => "Tier 2 - medium (6 files, team, 1-3 months)",
            MemoryTier::Tier3 => "Tier 3 - large (7+ files, complex, long-term)",
        }
    }

    /// Memory files generated for this tier, shown by the wizard.
    pub fn files(self) -> &'static [&'static str] {
        const TIER1: &[&str] = &[
            "project_overview.md",
            "current_issues_and_priorities.md",
            "implementation_status.md",
        ];
        const TIER2: &[&str] = &[
            "project_overview.md",
            "current_issues_and_priorities.md",
            "implementation_status.md",
            "database_specifications.md",
            "api_specifications.md",
            "system_architecture.md",
        ];
        const TIER3: &[&str] = &[
            "project_overview.md",
            "current_issues_and_priorities.md",
            "implementation_status.md",
            "database_specifications.md",
            "api_specifications.md",
            "system_architecture.md",
            "phase_progress.md",
        ];
        match self {
            MemoryTier::Tier1 => TIER1,
            MemoryTier::Tier2 => TIER2,
            MemoryTier::Tier3 => TIER3,
        }
    }
}

/// Project naming and ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectIdentity {
    /// Machine name: lowercase letters, digits and hyphens
    pub name: String,
    /// Human-readable display name
    pub display_name: String,
    /// Short description, may span multiple lines
    pub description: String,
    /// GitHub user or organization
    pub github_owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechStack {
    pub backend: BackendTech,
    pub frontend: FrontendTech,
    pub database: DatabaseType,
    /// Only meaningful when `backend` is Express
    #[serde(default)]
    pub express_orm: Option<ExpressOrm>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hosting {
    pub frontend: FrontendHosting,
    pub backend: BackendHosting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ports {
    pub frontend: u16,
    pub backend: u16,
}

impl Default for Ports {
    fn default() -> Self {
        Ports { frontend: 3000, backend: 8000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseCredentials {
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseCredentials {
    fn default() -> Self {
        DatabaseCredentials {
            name: "myapp_db".to_string(),
            user: "dbuser".to_string(),
            password: "Dev!Pass123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestUser {
    pub email: String,
    pub password: String,
}

impl Default for TestUser {
    fn default() -> Self {
        TestUser {
            email: "qa+test@example.com".to_string(),
            password: "TestPass!123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// JWT auth is always generated; OAuth (Google/GitHub) is optional
    pub use_oauth: bool,
    #[serde(default = "generate_jwt_secret")]
    pub jwt_secret: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings { use_oauth: true, jwt_secret: generate_jwt_secret() }
    }
}

/// Integration-server toggles substituted into `.mcp.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integrations {
    pub context7: bool,
    pub github: bool,
    pub serena: bool,
    pub playwright: bool,
    pub desktop_commander: bool,
    pub codex: bool,
    pub supabase: bool,
}

impl Default for Integrations {
    fn default() -> Self {
        Integrations {
            context7: true,
            github: true,
            serena: true,
            playwright: true,
            desktop_commander: true,
            codex: false,
            supabase: false,
        }
    }
}

/// Complete, validated project configuration. Built by the wizard, the
/// recommended preset, or deserialized from a JSON document on stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub identity: ProjectIdentity,
    pub stack: TechStack,
    pub hosting: Hosting,
    #[serde(default)]
    pub ports: Ports,
    #[serde(default)]
    pub database: DatabaseCredentials,
    pub memory_tier: MemoryTier,
    #[serde(default)]
    pub test_user: TestUser,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub integrations: Integrations,
}

const OAUTH_ENV_VARS: &str = "\n      - OAUTH_GOOGLE_CLIENT_ID=${OAUTH_GOOGLE_CLIENT_ID}\n      - OAUTH_GOOGLE_CLIENT_SECRET=${OAUTH_GOOGLE_CLIENT_SECRET}\n      - OAUTH_GITHUB_CLIENT_ID=${OAUTH_GITHUB_CLIENT_ID}\n      - OAUTH_GITHUB_CLIENT_SECRET=${OAUTH_GITHUB_CLIENT_SECRET}";
const OAUTH_FRONTEND_ENV: &str = "\n      - NEXT_PUBLIC_OAUTH_ENABLED=true";
const OAUTH_INFO: &str = " + OAuth (Google, GitHub)";

impl ProjectConfig {
    /// The "recommended" preset: proven stack, minimal questions.
    pub fn recommended(identity: ProjectIdentity) -> Self {
        let database = DatabaseCredentials {
            name: format!("{}_db", identity.name.replace('-', "_")),
            ..DatabaseCredentials::default()
        };
        ProjectConfig {
            identity,
            stack: TechStack {
                backend: BackendTech::Fastapi,
                frontend: FrontendTech::Nextjs,
                database: DatabaseType::Postgresql,
                express_orm: None,
            },
            hosting: Hosting {
                frontend: FrontendHosting::Vercel,
                backend: BackendHosting::Render,
            },
            ports: Ports::default(),
            database,
            memory_tier: MemoryTier::Tier2,
            test_user: TestUser::default(),
            auth: AuthSettings::default(),
            integrations: Integrations { codex: true, ..Integrations::default() },
        }
    }

    /// Builds the flat placeholder mapping consumed by the engine.
    ///
    /// Every value is fully expanded here; the engine treats them as
    /// opaque strings and performs no recursive substitution.
    pub fn placeholders(&self) -> Placeholders {
        let mut vars = Placeholders::new();
        let mut set = |key: &str, value: String| {
            vars.insert(key.to_string(), value);
        };

        set("PROJECT_NAME", self.identity.name.clone());
        set("PROJECT_DISPLAY_NAME", self.identity.display_name.clone());
        set("PROJECT_DESCRIPTION", self.identity.description.clone());
        set("GITHUB_OWNER", self.identity.github_owner.clone());
        set("CURRENT_DATE", Local::now().format("%Y-%m-%d").to_string());

        set("BACKEND_TECH", self.stack.backend.value().to_string());
        set("FRONTEND_TECH", self.stack.frontend.value().to_string());
        set("DATABASE_TYPE", self.stack.database.value().to_string());
        set(
            "EXPRESS_ORM",
            self.stack.express_orm.map(ExpressOrm::value).unwrap_or("none").to_string(),
        );
        set("BACKEND_COMMAND", self.stack.backend.dev_command().to_string());
        set("FRONTEND_COMMAND", self.stack.frontend.dev_command().to_string());

        let db = self.stack.database;
        set("DATABASE_IMAGE", db.image().to_string());
        set("DATABASE_PORT", db.port().to_string());
        set("DATABASE_INTERNAL_PORT", db.port().to_string());
        set("DATABASE_VOLUME_NAME", db.volume_name().to_string());
        set("DATABASE_VOLUME_PATH", db.volume_path().to_string());
        set("DATABASE_ENV_VARS", db.env_block(&self.database));
        set("DATABASE_URL", db.url(&self.database));
        set("DATABASE_NAME", self.database.name.clone());
        set("DATABASE_USER", self.database.user.clone());
        set("DATABASE_PASSWORD", self.database.password.clone());

        set("HOSTING_FRONTEND", self.hosting.frontend.value().to_string());
        set("HOSTING_BACKEND", self.hosting.backend.value().to_string());
        set("PORT_FRONTEND", self.ports.frontend.to_string());
        set("PORT_BACKEND", self.ports.backend.to_string());

        set("SERENA_TIER", self.memory_tier.value().to_string());
        set("TEST_USER_EMAIL", self.test_user.email.clone());
        set("TEST_USER_PASSWORD", self.test_user.password.clone());

        set("USE_JWT", flag(true));
        set("USE_OAUTH", flag(self.auth.use_oauth));
        set("OAUTH_ENABLED", flag(self.auth.use_oauth));
        set(
            "OAUTH_ENV_VARS",
            if self.auth.use_oauth { OAUTH_ENV_VARS.to_string() } else { String::new() },
        );
        set(
            "OAUTH_FRONTEND_ENV",
            if self.auth.use_oauth {
                OAUTH_FRONTEND_ENV.to_string()
            } else {
                String::new()
            },
        );
        set(
            "OAUTH_INFO",
            if self.auth.use_oauth { OAUTH_INFO.to_string() } else { String::new() },
        );
        set("JWT_SECRET", self.auth.jwt_secret.clone());

        set("MCP_CONTEXT7", flag(self.integrations.context7));
        set("MCP_GITHUB", flag(self.integrations.github));
        set("MCP_SERENA", flag(self.integrations.serena));
        set("MCP_PLAYWRIGHT", flag(self.integrations.playwright));
        set("MCP_DESKTOP_COMMANDER", flag(self.integrations.desktop_commander));
        set("MCP_CODEX", flag(self.integrations.codex));
        set("MCP_SUPABASE", flag(self.integrations.supabase));
        set("USE_SUPABASE", flag(self.integrations.supabase));

        // API keys are filled in by the user after generation
        set("CONTEXT7_API_KEY", "YOUR_CONTEXT7_API_KEY".to_string());
        set("GITHUB_TOKEN", "YOUR_GITHUB_TOKEN".to_string());
        set("SUPABASE_PROJECT_REF", "YOUR_SUPABASE_PROJECT_REF".to_string());

        vars
    }
}

/// Toggle values are the literal strings substituted into templates.
fn flag(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// Generates a random URL-safe secret for the JWT placeholder.
pub fn generate_jwt_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PROJECT_NAME_RE: OnceLock<Regex> = OnceLock::new();

/// Validates a machine-readable project name.
///
/// Allowed: lowercase letters, digits and hyphens; hyphens may not lead
/// or trail. The name doubles as a directory name and a placeholder value.
pub fn validate_project_name(name: &str) -> Result<()> {
    let re = PROJECT_NAME_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9-]+$").expect("project name pattern")
    });
    if !re.is_match(name) {
        return Err(Error::ValidationError(
            "project name may only contain lowercase letters, digits and hyphens"
                .to_string(),
        ));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(Error::ValidationError(
            "project name may not start or end with a hyphen".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern")
    });
    if !re.is_match(email) {
        return Err(Error::ValidationError("enter a valid email address".to_string()));
    }
    Ok(())
}

/// Passwords need at least 8 characters including a letter and a digit.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(Error::ValidationError(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(Error::ValidationError(
            "password must contain a letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::ValidationError("password must contain a digit".to_string()));
    }
    Ok(())
}
