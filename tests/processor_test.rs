use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use mason::config::{
    BackendHosting, BackendTech, DatabaseType, FrontendHosting, FrontendTech, Hosting,
    MemoryTier, ProjectConfig, ProjectIdentity, TechStack,
};
use mason::error::{Error, Result};
use mason::processor::{ensure_project_dir, project_dir, Materializer};
use mason::prompt::Prompter;
use tempfile::TempDir;

/// Prompter stub that replays canned confirmations.
struct ScriptedPrompter {
    confirms: RefCell<VecDeque<bool>>,
}

impl ScriptedPrompter {
    fn confirming(answers: &[bool]) -> Self {
        Self { confirms: RefCell::new(answers.iter().copied().collect()) }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, _prompt: &str, _default: Option<&str>) -> Result<String> {
        panic!("unexpected input prompt");
    }

    fn select(&self, _prompt: &str, _items: &[String], _default: usize) -> Result<usize> {
        panic!("unexpected select prompt");
    }

    fn confirm(&self, _prompt: &str, _default: bool) -> Result<bool> {
        Ok(self.confirms.borrow_mut().pop_front().expect("no scripted confirm left"))
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Template tree mirroring the real layout: root files, agent tooling,
/// rules, docs, tiered memories, skeletons, deployments, CI.
fn sample_template(root: &Path) {
    write(root, "README.md.template", "# {{PROJECT_NAME}}\n{{PROJECT_DESCRIPTION}}\n");
    write(root, "CLAUDE.md.template", "Owner: {{GITHUB_OWNER}}\n");
    write(root, ".gitignore", "node_modules\n__pycache__\n");
    write(
        root,
        "docker-compose.yml.template",
        "image: {{DATABASE_IMAGE}}\nenvironment:{{DATABASE_ENV_VARS}}\n",
    );
    write(root, ".claude/settings.json.template", "{\"project\": \"{{PROJECT_NAME}}\"}\n");
    write(root, ".claude/agents/e2e-tester.md.template", "email: {{TEST_USER_EMAIL}}\n");
    write(root, "ai-rules/common/style.md", "shared style rules\n");
    write(
        root,
        "ai-rules/_project_template/REQUIREMENTS.md.template",
        "# {{PROJECT_DISPLAY_NAME}} requirements\n",
    );
    write(root, "docs/SETUP.md.template", "Backend: {{BACKEND_TECH}}\n");
    for tier in ["tier1", "tier2"] {
        write(
            root,
            &format!(".serena/memories/{}/project_overview.md.template", tier),
            "{{PROJECT_NAME}} overview\n",
        );
        write(
            root,
            &format!(".serena/memories/{}/current_issues_and_priorities.md.template", tier),
            "none yet\n",
        );
        write(
            root,
            &format!(".serena/memories/{}/implementation_status.md.template", tier),
            "starting\n",
        );
    }
    write(root, ".serena/memories/tier2/database_specifications.md.template", "db\n");
    write(root, ".serena/memories/tier2/api_specifications.md.template", "api\n");
    write(root, ".serena/memories/tier2/system_architecture.md.template", "arch\n");
    write(root, "backend/skeleton/fastapi/app/main.py", "app = FastAPI()\n");
    write(root, "backend/skeleton/fastapi/.env.example.template", "DATABASE_URL={{DATABASE_URL}}\n");
    write(root, "backend/skeleton/django/manage.py", "# django\n");
    write(root, "frontend/skeleton/nextjs/package.json.template", "{\"name\": \"{{PROJECT_NAME}}\"}\n");
    write(root, "frontend/skeleton/react/package.json", "{\"name\": \"react-app\"}\n");
    write(root, "deployment/vercel/vercel.json.template", "{\"name\": \"{{PROJECT_NAME}}\"}\n");
    write(root, "deployment/self-hosted/docker-compose.prod.yml.template", "port: {{PORT_BACKEND}}\n");
    write(root, "deployment/aws/notes.md", "aws notes\n");
    write(root, ".github/workflows/ci.yml.template", "name: {{PROJECT_NAME}}-ci\n");
}

fn sample_config() -> ProjectConfig {
    let mut config = ProjectConfig::recommended(ProjectIdentity {
        name: "demo-app".to_string(),
        display_name: "Demo App".to_string(),
        description: "A demo application".to_string(),
        github_owner: "octocat".to_string(),
    });
    config.stack = TechStack {
        backend: BackendTech::Fastapi,
        frontend: FrontendTech::Nextjs,
        database: DatabaseType::Postgresql,
        express_orm: None,
    };
    config.hosting =
        Hosting { frontend: FrontendHosting::Vercel, backend: BackendHosting::Tbd };
    config.memory_tier = MemoryTier::Tier1;
    config
}

fn materialize_into(config: &ProjectConfig, template: &Path, project: &Path) {
    fs::create_dir_all(project).unwrap();
    Materializer::new(config, template, project).unwrap().run().unwrap();
}

#[test]
fn test_end_to_end_scenario() {
    let template = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    sample_template(template.path());

    let config = sample_config();
    let project = project_dir(out.path(), &config.identity.name);
    assert_eq!(project, out.path().join("demo-app"));
    materialize_into(&config, template.path(), &project);

    // root files: markers stripped, placeholders substituted
    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert_eq!(readme, "# demo-app\nA demo application\n");
    assert!(!project.join("README.md.template").exists());

    // verbatim root file is byte-identical
    let gitignore = fs::read(project.join(".gitignore")).unwrap();
    assert_eq!(gitignore, fs::read(template.path().join(".gitignore")).unwrap());

    // derived database values land expanded
    let compose = fs::read_to_string(project.join("docker-compose.yml")).unwrap();
    assert!(compose.contains("image: postgres:15-alpine"));
    assert!(compose.contains("POSTGRES_DB=demo_app_db"));
    assert!(!compose.contains("{{"));

    // integration tooling subtree
    let settings = fs::read_to_string(project.join(".claude/settings.json")).unwrap();
    assert!(settings.contains("\"demo-app\""));

    // rules: shared verbatim + project subtree renamed
    assert!(project.join("ai-rules/common/style.md").exists());
    let requirements =
        fs::read_to_string(project.join("ai-rules/demo-app/REQUIREMENTS.md")).unwrap();
    assert_eq!(requirements, "# Demo App requirements\n");
    assert!(!project.join("ai-rules/_project_template").exists());

    // tier1 memories: exactly the three files
    let memories: Vec<_> = fs::read_dir(project.join(".serena/memories"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(memories.len(), 3);
    assert!(memories.contains(&"project_overview.md".to_string()));

    // skeletons: selected variant only, flattened into backend/ frontend/
    assert!(project.join("backend/app/main.py").exists());
    let env = fs::read_to_string(project.join("backend/.env.example")).unwrap();
    assert!(env.starts_with("DATABASE_URL=postgresql://"));
    assert!(!project.join("backend/skeleton").exists());
    let package = fs::read_to_string(project.join("frontend/package.json")).unwrap();
    assert!(package.contains("\"demo-app\""));

    // deployment: frontend side only, backend is tbd
    let deployments: Vec<_> = fs::read_dir(project.join("deployment"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(deployments, vec!["vercel".to_string()]);

    // CI subtree
    let ci = fs::read_to_string(project.join(".github/workflows/ci.yml")).unwrap();
    assert_eq!(ci, "name: demo-app-ci\n");
}

#[test]
fn test_deployment_deduplication() {
    let template = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    sample_template(template.path());

    let mut config = sample_config();
    config.hosting = Hosting {
        frontend: FrontendHosting::SelfHosted,
        backend: BackendHosting::SelfHosted,
    };
    let project = out.path().join("demo-app");
    materialize_into(&config, template.path(), &project);

    let deployments: Vec<_> = fs::read_dir(project.join("deployment"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(deployments, vec!["self-hosted".to_string()]);
}

#[test]
fn test_both_hosting_tbd_writes_no_deployment() {
    let template = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    sample_template(template.path());

    let mut config = sample_config();
    config.hosting =
        Hosting { frontend: FrontendHosting::Tbd, backend: BackendHosting::Tbd };
    let project = out.path().join("demo-app");
    materialize_into(&config, template.path(), &project);

    assert!(!project.join("deployment").exists());
}

#[test]
fn test_determinism() {
    let template = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    sample_template(template.path());

    let config = sample_config();
    let first = out.path().join("first");
    let second = out.path().join("second");
    materialize_into(&config, template.path(), &first);
    materialize_into(&config, template.path(), &second);

    assert!(!dir_diff::is_different(&first, &second).unwrap());
}

#[test]
fn test_missing_variant_subtree_is_skipped() {
    let template = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    sample_template(template.path());

    let mut config = sample_config();
    // no express skeleton in the sample template
    config.stack.backend = BackendTech::Express;
    let project = out.path().join("demo-app");
    materialize_into(&config, template.path(), &project);

    assert!(!project.join("backend").exists());
    assert!(project.join("frontend/package.json").exists());
}

#[test]
fn test_ignore_file_excludes_paths() {
    let template = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    sample_template(template.path());
    write(template.path(), ".masonignore", "*.secret\n");
    write(template.path(), "notes.secret", "do not copy\n");

    let config = sample_config();
    let project = out.path().join("demo-app");
    materialize_into(&config, template.path(), &project);

    assert!(!project.join("notes.secret").exists());
    assert!(!project.join(".masonignore").exists());
    assert!(project.join("README.md").exists());
}

#[test]
fn test_overwrite_gate_declined() {
    let out = TempDir::new().unwrap();
    let project = out.path().join("demo-app");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("precious.txt"), "keep me").unwrap();

    let prompt = ScriptedPrompter::confirming(&[false]);
    let result = ensure_project_dir(&prompt, &project, false);

    match result {
        Err(Error::ProjectDirectoryExistsError { .. }) => {}
        other => panic!("expected ProjectDirectoryExistsError, got {:?}", other),
    }
    // zero writes: prior contents untouched
    assert_eq!(fs::read_to_string(project.join("precious.txt")).unwrap(), "keep me");
}

#[test]
fn test_overwrite_gate_accepted_clears_prior_contents() {
    let out = TempDir::new().unwrap();
    let project = out.path().join("demo-app");
    fs::create_dir_all(project.join("stale")).unwrap();
    fs::write(project.join("stale/old.txt"), "old").unwrap();

    let prompt = ScriptedPrompter::confirming(&[true]);
    ensure_project_dir(&prompt, &project, false).unwrap();

    assert!(project.exists());
    assert!(!project.join("stale").exists());
}

#[test]
fn test_force_skips_confirmation() {
    let out = TempDir::new().unwrap();
    let project = out.path().join("demo-app");
    fs::create_dir_all(&project).unwrap();

    // would panic on any prompt
    let prompt = ScriptedPrompter::confirming(&[]);
    ensure_project_dir(&prompt, &project, true).unwrap();
    assert!(project.exists());
}

#[test]
fn test_fresh_destination_needs_no_confirmation() {
    let out = TempDir::new().unwrap();
    let project = out.path().join("demo-app");

    let prompt = ScriptedPrompter::confirming(&[]);
    ensure_project_dir(&prompt, &project, false).unwrap();
    assert!(project.is_dir());
}

#[test]
fn test_template_root_missing_is_an_error() {
    let out = TempDir::new().unwrap();
    let config = sample_config();
    let result =
        Materializer::new(&config, Path::new("/nonexistent/template"), out.path());
    assert!(matches!(result, Err(Error::TemplateError(_))));
}

#[test]
fn test_source_never_mutated() {
    let template = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    sample_template(template.path());

    let snapshot = TempDir::new().unwrap();
    copy_tree(template.path(), snapshot.path());

    let config = sample_config();
    materialize_into(&config, template.path(), &out.path().join("demo-app"));

    assert!(!dir_diff::is_different(template.path(), snapshot.path()).unwrap());
}

fn copy_tree(from: &Path, to: &Path) {
    for entry in walkdir::WalkDir::new(from) {
        let entry = entry.unwrap();
        let relative = entry.path().strip_prefix(from).unwrap();
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::create_dir_all(target.parent().unwrap()).unwrap();
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}
