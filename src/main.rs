use anyhow::Result;
use clap::Parser;
use tracing::error;

use followback::args::OutputFormat;
use followback::report::{self, ReportOptions};
use followback::utils::{setup_logging, validate_args};
use followback::{analyze_export_files, discover_archive, rank, Args, ExportError, ExportPaths};

fn resolve_paths(args: &Args) -> Result<ExportPaths> {
    if let Some(archive) = &args.archive {
        return discover_archive(archive);
    }
    match &args.following {
        Some(following) => Ok(ExportPaths {
            followers: args.followers.clone(),
            following: following.clone(),
        }),
        None => anyhow::bail!("--following is required unless --archive is given"),
    }
}

fn run(args: &Args) -> Result<()> {
    let paths = resolve_paths(args)?;
    let result = analyze_export_files(&paths)?;

    let options = ReportOptions {
        top: args.top,
        redact: args.redact,
    };
    let lists: Vec<_> = args
        .list
        .lists()
        .into_iter()
        .map(|list| (list, rank(result.list(list), args.sort)))
        .collect();

    match args.format {
        OutputFormat::Text => {
            report::print_summary(&result.summary());
            for (list, users) in &lists {
                report::print_list(*list, users, &options);
            }
        }
        OutputFormat::Json => println!("{}", report::render_json(&result, &lists, &options)?),
    }

    if let Some(dir) = &args.output_dir {
        for (list, users) in &lists {
            report::write_list_files(dir, *list, users, &options)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    if let Err(e) = run(&args) {
        error!(error = %format!("{:#}", e), "Analysis failed");
        match e.downcast_ref::<ExportError>() {
            Some(export_error) => eprintln!("Error: {}\n{:#}", export_error.user_message(), e),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
    Ok(())
}
