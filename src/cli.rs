use std::{env, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub range: bool,
    pub json: bool,
}

pub const USAGE: &str = "Usage: sheetcal [--config PATH] [--range] [--json]";

pub fn parse_cli_options() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next_if(|next| !next.starts_with("--"))
                    .ok_or_else(|| "--config needs a path".to_string())?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--range" => options.range = true,
            "--json" => options.json = true,
            "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(options)
}
