//! Mason's main application entry point and orchestration logic.
//! Collects the project configuration, runs the overwrite safety gate,
//! hands off to the materialization engine and prints the wrap-up.

use mason::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::{ensure_project_dir, project_dir, Materializer},
    prompt::{DialoguerPrompter, Prompter},
    summary, ui, wizard,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Collects the configuration (wizard, preset or stdin JSON)
/// 2. Shows the recap and asks for confirmation
/// 3. Runs the overwrite gate on the destination directory
/// 4. Materializes the template tree
/// 5. Prints the next-steps summary
fn run(args: Args) -> Result<()> {
    let prompt = DialoguerPrompter::new();

    ui::print_header("Project template initializer");

    let config = if args.stdin {
        wizard::config_from_stdin()?
    } else {
        wizard::run_wizard(&prompt, args.recommended)?
    };

    summary::print_confirmation(&config);

    if !args.stdin
        && !prompt.confirm("Initialize the project with these settings?", true)?
    {
        ui::print_error("Initialization cancelled");
        return Ok(());
    }

    let project_dir = project_dir(&args.output_dir, &config.identity.name);
    ensure_project_dir(&prompt, &project_dir, args.force)?;
    ui::print_success(&format!("Project directory created: {}", project_dir.display()));

    ui::print_info("Copying template files...");
    let materializer = Materializer::new(&config, &args.template_dir, &project_dir)?;
    materializer.run()?;

    ui::print_success("Project initialized");
    summary::print_next_steps(&config, &project_dir);
    Ok(())
}
