//! Interactive configuration collector.
//!
//! Walks the user through the question groups and produces a complete
//! [`ProjectConfig`]. The recommended mode asks only the four identity
//! questions and applies the preset; both modes feed the same typed
//! structure, so placeholder construction happens in exactly one place.

use std::io::Read;

use crate::config::{
    validate_email, validate_password, validate_project_name, AuthSettings,
    BackendHosting, BackendTech, DatabaseCredentials, DatabaseType, ExpressOrm,
    FrontendHosting, FrontendTech, Hosting, Integrations, MemoryTier, Ports,
    ProjectConfig, ProjectIdentity, TechStack, TestUser,
};
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::ui;

/// How the configuration gets filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Recommended,
    Custom,
}

/// Runs the wizard and returns the collected configuration.
pub fn run_wizard(prompt: &dyn Prompter, recommended: bool) -> Result<ProjectConfig> {
    let mode = if recommended { Mode::Recommended } else { select_mode(prompt)? };

    match mode {
        Mode::Recommended => {
            ui::print_header("Recommended setup");
            ui::print_info("Minimal questions, proven stack:");
            println!("  - Backend: FastAPI (Python)");
            println!("  - Frontend: Next.js (React)");
            println!("  - Database: PostgreSQL");
            println!("  - Auth: JWT + OAuth (Google/GitHub)");
            println!("  - Hosting: Vercel (frontend) + Render (backend)");
            println!("  - Memory tier: Tier 2 (medium projects)\n");

            let identity = collect_identity(prompt, true)?;
            Ok(ProjectConfig::recommended(identity))
        }
        Mode::Custom => {
            ui::print_header("Custom setup");
            let identity = collect_identity(prompt, false)?;
            let stack = collect_stack(prompt)?;
            let hosting = collect_hosting(prompt)?;
            let ports = collect_ports(prompt)?;
            let database = collect_database_credentials(prompt, &identity.name)?;
            let memory_tier = collect_memory_tier(prompt)?;
            let test_user = collect_test_user(prompt)?;
            let auth = collect_auth(prompt)?;
            let integrations = collect_integrations(prompt)?;

            Ok(ProjectConfig {
                identity,
                stack,
                hosting,
                ports,
                database,
                memory_tier,
                test_user,
                auth,
                integrations,
            })
        }
    }
}

/// Deserializes a full configuration from a JSON document on stdin,
/// bypassing the interactive flow entirely.
pub fn config_from_stdin() -> Result<ProjectConfig> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    config_from_json(&buffer)
}

pub fn config_from_json(content: &str) -> Result<ProjectConfig> {
    let config: ProjectConfig = serde_json::from_str(content)
        .map_err(|e| Error::ConfigError(format!("invalid answers document: {}", e)))?;
    validate_project_name(&config.identity.name)?;
    validate_email(&config.test_user.email)?;
    validate_password(&config.test_user.password)?;
    Ok(config)
}

fn select_mode(prompt: &dyn Prompter) -> Result<Mode> {
    let items = vec![
        "Recommended setup (fast, proven stack)".to_string(),
        "Custom setup (answer every question)".to_string(),
    ];
    let choice = prompt.select("Select initialization mode", &items, 0)?;
    Ok(if choice == 0 { Mode::Recommended } else { Mode::Custom })
}

fn collect_identity(prompt: &dyn Prompter, with_defaults: bool) -> Result<ProjectIdentity> {
    if !with_defaults {
        ui::print_header("Project basics");
    }

    let name_default = if with_defaults { Some("my-awesome-app") } else { None };
    let name = loop {
        let candidate =
            prompt.input("[1/4] Project name (lowercase, digits, hyphens)", name_default)?;
        match validate_project_name(&candidate) {
            Ok(()) => break candidate,
            Err(err) => ui::print_error(&err.to_string()),
        }
    };

    let display_default = title_case(&name);
    let display_name = prompt.input(
        "[2/4] Project display name",
        if with_defaults { Some(display_default.as_str()) } else { None },
    )?;
    let display_name =
        if display_name.is_empty() { display_default } else { display_name };

    let description = if with_defaults {
        prompt.input("[3/4] Project description (one line)", Some("A great web application"))?
    } else {
        collect_description(prompt)?
    };

    let github_owner = prompt.input(
        "[4/4] GitHub user or organization",
        if with_defaults { Some("your-username") } else { None },
    )?;

    Ok(ProjectIdentity { name, display_name, description, github_owner })
}

/// Up to two lines; an empty line finishes early.
fn collect_description(prompt: &dyn Prompter) -> Result<String> {
    let mut lines = Vec::new();
    while lines.len() < 2 {
        let line = prompt.input("[3/4] Project description (blank line to finish)", None)?;
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn collect_stack(prompt: &dyn Prompter) -> Result<TechStack> {
    ui::print_header("Tech stack");

    let items = labels(BackendTech::ALL.iter().map(|t| t.label()));
    let backend = BackendTech::ALL[prompt.select("[1/3] Backend technology", &items, 0)?];

    let items = labels(FrontendTech::ALL.iter().map(|t| t.label()));
    let frontend =
        FrontendTech::ALL[prompt.select("[2/3] Frontend technology", &items, 0)?];

    let items = labels(DatabaseType::ALL.iter().map(|t| t.label()));
    let database = DatabaseType::ALL[prompt.select("[3/3] Database", &items, 0)?];

    let express_orm = if backend == BackendTech::Express {
        let items = labels(ExpressOrm::ALL.iter().map(|t| t.label()));
        Some(ExpressOrm::ALL[prompt.select("ORM / query builder for Express", &items, 0)?])
    } else {
        None
    };

    Ok(TechStack { backend, frontend, database, express_orm })
}

fn collect_hosting(prompt: &dyn Prompter) -> Result<Hosting> {
    ui::print_header("Hosting targets");

    let items = labels(FrontendHosting::ALL.iter().map(|t| t.label()));
    let frontend =
        FrontendHosting::ALL[prompt.select("[1/2] Frontend hosting", &items, 0)?];

    let items = labels(BackendHosting::ALL.iter().map(|t| t.label()));
    let backend = BackendHosting::ALL[prompt.select("[2/2] Backend hosting", &items, 0)?];

    Ok(Hosting { frontend, backend })
}

fn collect_ports(prompt: &dyn Prompter) -> Result<Ports> {
    ui::print_header("Ports");

    let frontend = collect_port(prompt, "[1/2] Frontend port", "3000")?;
    let backend = collect_port(prompt, "[2/2] Backend port", "8000")?;

    ui::print_info("Running several projects side by side? Use distinct ports");
    ui::print_info("e.g. project A (3000/8000), project B (3001/8001)");

    Ok(Ports { frontend, backend })
}

fn collect_port(prompt: &dyn Prompter, question: &str, default: &str) -> Result<u16> {
    loop {
        let raw = prompt.input(question, Some(default))?;
        match raw.parse::<u16>() {
            Ok(port) => return Ok(port),
            Err(_) => ui::print_error("enter a port number between 0 and 65535"),
        }
    }
}

fn collect_database_credentials(
    prompt: &dyn Prompter,
    project_name: &str,
) -> Result<DatabaseCredentials> {
    ui::print_header("Database credentials");

    let name_default = format!("{}_db", project_name.replace('-', "_"));
    let name = prompt.input("[1/3] Database name", Some(&name_default))?;
    let user = prompt.input("[2/3] Database user", Some("dbuser"))?;
    let password =
        prompt.input("[3/3] Database password (development)", Some("Dev!Pass123"))?;

    ui::print_warning("Use a strong password in production environments");

    Ok(DatabaseCredentials { name, user, password })
}

fn collect_memory_tier(prompt: &dyn Prompter) -> Result<MemoryTier> {
    ui::print_header("Memory tier");

    let items = labels(MemoryTier::ALL.iter().map(|t| t.label()));
    let tier = MemoryTier::ALL[prompt.select("Project scale", &items, 1)?];

    ui::print_success(&format!(
        "{} selected; these memory files will be generated:",
        tier.value()
    ));
    for file in tier.files() {
        println!("   - {}", file);
    }

    Ok(tier)
}

fn collect_test_user(prompt: &dyn Prompter) -> Result<TestUser> {
    ui::print_header("Test user");

    let email = loop {
        let candidate =
            prompt.input("[1/2] Test user email", Some("qa+test@example.com"))?;
        match validate_email(&candidate) {
            Ok(()) => break candidate,
            Err(err) => ui::print_error(&err.to_string()),
        }
    };

    let password = loop {
        let candidate = prompt.input(
            "[2/2] Test user password (8+ chars, letters and digits)",
            Some("TestPass!123"),
        )?;
        match validate_password(&candidate) {
            Ok(()) => break candidate,
            Err(err) => ui::print_error(&err.to_string()),
        }
    };

    ui::print_warning("These credentials end up in .claude/agents/e2e-tester.md");

    Ok(TestUser { email, password })
}

fn collect_auth(prompt: &dyn Prompter) -> Result<AuthSettings> {
    ui::print_header("Authentication");

    let use_oauth = prompt.confirm("Enable OAuth (Google/GitHub) login?", true)?;
    if use_oauth {
        ui::print_info("OAuth enabled; you will need:");
        ui::print_info("  - Google: an OAuth 2.0 client ID");
        ui::print_info("  - GitHub: an OAuth App");
        ui::print_info("See the generated docs/SETUP.md for details");
    }

    Ok(AuthSettings { use_oauth, ..AuthSettings::default() })
}

fn collect_integrations(prompt: &dyn Prompter) -> Result<Integrations> {
    ui::print_header("Integration servers");

    println!("{}", ui::label("[required]"));
    let context7 = prompt.confirm("  - context7: up-to-date library docs", true)?;
    let github = prompt.confirm("  - github: GitHub integration", true)?;
    let serena = prompt.confirm("  - serena: codebase management", true)?;

    println!("\n{}", ui::label("[recommended]"));
    let playwright = prompt.confirm("  - playwright: E2E testing", true)?;
    let desktop_commander = prompt.confirm("  - desktop-commander: system control", true)?;
    let codex = prompt.confirm("  - codex: code generation aid", false)?;

    println!("\n{}", ui::label("[optional]"));
    let supabase =
        prompt.confirm("  - supabase: Supabase integration (PostgreSQL only)", false)?;

    ui::print_success("Integration servers configured");

    Ok(Integrations {
        context7,
        github,
        serena,
        playwright,
        desktop_commander,
        codex,
        supabase,
    })
}

fn labels<'a>(iter: impl Iterator<Item = &'a str>) -> Vec<String> {
    iter.map(str::to_string).collect()
}

fn title_case(name: &str) -> String {
    name.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
