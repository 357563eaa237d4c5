use crate::config::Config;
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "gpunch")]
#[command(about = "Draw a punch card of git commit activity by weekday and hour")]
#[command(version)]
#[command(after_help = "\
Options are key=value tokens:
  width=<px>        image width, height is width/2.75 (default 1100)
  author=<name>     only count commits by this author
  file=<path>       output file (.svg, .png, .jpg, .bmp, .json, .txt); omit to draw on the terminal
  path=<dir>        repository to read (default .)
  opaque=<auto|n>   fixed gray level 0..1 for every circle (default auto)
  utc[=true]        convert commit times to UTC
  timezone=<hours>  convert commit times to this offset, e.g. -5 or 5.5
  plotter=<name>    image, terminal or json (default: from file extension)
Tokens starting with '-' are passed to git log, e.g. --since=2024-01-01")]
pub struct Cli {
    #[arg(
        value_name = "KEY=VALUE|GIT-FLAG",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub tokens: Vec<String>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let config = Config::from_tokens(&self.tokens).context("Invalid options")?;
        crate::punch::exec(&config)
    }
}
