use chrono::{DateTime, Utc};
use time::macros::format_description;
use tracing_subscriber::fmt::time::{LocalTime, UtcTime};
use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let format = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // The local offset is unavailable on some platforms once threads exist.
    let result = if time::UtcOffset::current_local_offset().is_ok() {
        builder.with_timer(LocalTime::new(format)).try_init()
    } else {
        builder.with_timer(UtcTime::new(format)).try_init()
    };
    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

pub fn format_number(num: usize) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `Jan 1, 2024`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Keep the first character of a username and mask the rest.
pub fn redact_username(username: &str) -> String {
    let mut chars = username.chars();
    match chars.next() {
        None => String::new(),
        Some(_) if username.chars().count() == 1 => "*".to_string(),
        Some(first) => {
            let mut redacted = String::with_capacity(username.len());
            redacted.push(first);
            redacted.extend(chars.map(|_| '*'));
            redacted
        }
    }
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if let Some(top) = args.top {
        if top == 0 {
            anyhow::bail!("--top must be greater than 0");
        }
    }

    if args.archive.is_none() {
        if args.followers.is_empty() {
            anyhow::bail!("--followers is required unless --archive is given");
        }
        if args.following.is_none() {
            anyhow::bail!("--following is required unless --archive is given");
        }
    }

    Ok(())
}
