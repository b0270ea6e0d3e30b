use clap::Parser;
use esx_photos::{Cli, EsxPhotos, EsxPhotosError, OutputFormatter, OutputMode, UserFriendlyError};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

const DEFAULT_CONFIG_FILE: &str = "esx-photos.toml";

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let start_time = Instant::now();
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match EsxPhotos::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    let Some(ref project) = cli.file else {
        app.output_formatter().error("No project file given");
        return 2;
    };

    if cli.dry_run {
        return handle_dry_run(&app, project);
    }

    match app.extract_images(project) {
        Ok(report) => {
            let formatter = app.output_formatter();
            formatter.print_extraction_report(&report);
            if !cli.quiet {
                formatter.print_elapsed(start_time.elapsed());
            }
            0
        }
        Err(e) => {
            app.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    match EsxPhotos::generate_sample_config(&config_path) {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!(
                "  esx-photos <project.esx> --config {}",
                config_path.display()
            );
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            e.exit_code()
        }
    }
}

fn handle_dry_run(app: &EsxPhotos, project: &Path) -> i32 {
    let formatter = app.output_formatter();

    formatter.info("DRY RUN MODE - No pictures will be copied");
    formatter.print_separator();

    let config = app.config();
    formatter.info("Configuration that would be used:");
    formatter.info(&format!("  Output directory: {}", config.output_directory().display()));
    formatter.info(&format!("  Image extension: {}", config.output.image_extension));
    formatter.info(&format!("  Allow unicode: {}", config.output.allow_unicode));

    match app.plan_only(project) {
        Ok(plan) => {
            formatter.print_plan(&plan);
            formatter.print_separator();
            formatter.success("Dry run completed successfully");
            formatter.info("Run without --dry-run to copy the pictures");
            0
        }
        Err(e) => {
            app.handle_error(&e);
            e.exit_code()
        }
    }
}

fn print_startup_error(error: &EsxPhotosError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
