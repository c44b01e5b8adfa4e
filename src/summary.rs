//! Pre-run confirmation and post-run "next steps" output.

use std::path::Path;

use crate::config::ProjectConfig;
use crate::ui;

/// Settings recap shown before the user confirms materialization.
pub fn print_confirmation(config: &ProjectConfig) {
    ui::print_header("Review settings");
    println!("{} {}", ui::label("Project name:"), config.identity.name);
    println!("{} {}", ui::label("Backend:"), config.stack.backend.value());
    println!("{} {}", ui::label("Frontend:"), config.stack.frontend.value());
    println!("{} {}", ui::label("Database:"), config.stack.database.value());
    println!(
        "{} {} (frontend) / {} (backend)",
        ui::label("Hosting:"),
        config.hosting.frontend.value(),
        config.hosting.backend.value()
    );
    println!("{} {}", ui::label("Memory tier:"), config.memory_tier.value());
    println!();
}

/// Human-readable wrap-up after a successful run.
pub fn print_next_steps(config: &ProjectConfig, project_dir: &Path) {
    ui::print_header("Next steps");

    println!("{} {}", ui::label("Project name:"), config.identity.name);
    println!("{} {}\n", ui::label("Generated at:"), project_dir.display());

    println!("{}", ui::label("Generated highlights:"));
    let mut highlights = vec![
        "CLAUDE.md".to_string(),
        ".mcp.json (API keys still required)".to_string(),
        "docker-compose.yml".to_string(),
        format!("backend/ ({})", config.stack.backend.value()),
        format!("frontend/ ({})", config.stack.frontend.value()),
        format!(".serena/memories/ ({})", config.memory_tier.value()),
        "ai-rules/".to_string(),
        "docs/".to_string(),
    ];
    if let Some(dir) = config.hosting.frontend.deploy_dir() {
        highlights.push(format!("deployment/{}/ (frontend)", dir));
    }
    if let Some(dir) = config.hosting.backend.deploy_dir() {
        if config.hosting.backend.value() != config.hosting.frontend.value() {
            highlights.push(format!("deployment/{}/ (backend)", dir));
        }
    }
    for item in &highlights {
        ui::print_success(item);
    }

    println!("\n{}", ui::label("To get started:"));
    let steps = [
        format!("cd {}", project_dir.display()),
        "set environment files (backend/.env, frontend/.env)".to_string(),
        "set API keys (.mcp.json)".to_string(),
        format!("fill in requirements (ai-rules/{}/REQUIREMENTS.md)", config.identity.name),
        "git init && git add . && git commit -m \"Initial commit\"".to_string(),
        "start building".to_string(),
    ];
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    println!("\n{}", ui::label("Required configuration:"));
    println!("  1. API keys in .mcp.json");
    println!("     - CONTEXT7_API_KEY");
    println!("     - GITHUB_TOKEN");
    if config.integrations.supabase {
        println!("     - SUPABASE_PROJECT_REF");
    }
    println!("  2. Environment files");
    println!("     - backend/.env.example -> backend/.env");
    println!("     - frontend/.env.example -> frontend/.env.local");
    println!();
}
