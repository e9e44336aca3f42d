//! picobridge-stackcfg — заголовок конфигурации сетевого стека
//!
//! Пишет `mongoose_config.h` для сборки стека; с `--layout` добавляет
//! смещения полей `cyw43_t` для сверки с конфигурацией драйвера.
//! Writes the network stack's config header; `--layout` appends the
//! `cyw43_t` field offsets for cross-checking against the driver build.
//!
//! Запуск / Run:
//!   picobridge-stackcfg build/mongoose_config.h --layout

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use clap::Parser;
use libpicobridge::cyw43::{self, LL_STATE_SIZE_WORDS, TARGET_POINTER_BYTES, TARGET_SIZE};
use libpicobridge::netcfg::StackConfig;
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "picobridge-stackcfg", version, long_about = None)]
struct Args {
    /// Output header path (stdout if omitted)
    out: Option<PathBuf>,

    /// Append cyw43_t field offsets as comments
    #[arg(long, default_value_t = false)]
    layout: bool,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

/// Заголовок целиком / The whole header text
fn generate(config: &StackConfig, layout: bool) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    config.render(&mut out)?;
    if layout {
        writeln!(out)?;
        writeln!(out, "// cyw43_t layout (RP2350, {}-byte pointers)", TARGET_POINTER_BYTES)?;
        writeln!(out, "// cyw43_ll_t: {} words", LL_STATE_SIZE_WORDS)?;
        writeln!(out, "// sizeof(cyw43_t): {}", TARGET_SIZE)?;
        for (field, offset) in cyw43::FIELD_OFFSETS {
            writeln!(out, "//   {:<20} {}", field, offset)?;
        }
    }
    Ok(out)
}

fn write_output(path: Option<&Path>, text: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            fs::write(path, text)
        }
        None => io::stdout().lock().write_all(text.as_bytes()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let config = StackConfig::DEFAULT;
    debug!("{:?}", config);

    let header = generate(&config, args.layout)?;
    write_output(args.out.as_deref(), &header)?;

    if let Some(path) = &args.out {
        info!("wrote {} ({} bytes)", path.display(), header.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_without_layout_is_the_rendered_config() {
        let mut expected = String::new();
        StackConfig::DEFAULT.render(&mut expected).unwrap();
        assert_eq!(generate(&StackConfig::DEFAULT, false).unwrap(), expected);
    }

    #[test]
    fn layout_lists_every_declared_field() {
        let header = generate(&StackConfig::DEFAULT, true).unwrap();
        assert!(header.contains("// cyw43_ll_t: 532 words"));
        for (field, _) in cyw43::FIELD_OFFSETS {
            assert!(header.contains(field), "missing {field}");
        }
        assert!(header.lines().any(|l| l.starts_with("//   itf_state") && l.ends_with(" 2128")));
    }

    #[test]
    fn layout_is_the_rp2350_one_on_any_host() {
        let header = generate(&StackConfig::DEFAULT, true).unwrap();
        let offset = |field: &str| {
            header
                .lines()
                .find(|l| l.split_whitespace().nth(1) == Some(field))
                .and_then(|l| l.split_whitespace().nth(2))
                .map(|n| n.parse::<usize>().unwrap())
        };
        assert_eq!(offset("wifi_scan_cb"), Some(2148));
        assert_eq!(offset("ap_ssid"), Some(2163));
        assert_eq!(offset("mac"), Some(2443));
        assert!(header.contains("// sizeof(cyw43_t): 2452"));
        assert!(header.contains("4-byte pointers"));
    }

    #[test]
    fn writes_into_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build").join("mongoose_config.h");
        write_output(Some(&path), "#pragma once\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "#pragma once\n");
    }

    #[test]
    fn args_parse_positional_out() {
        let args = Args::parse_from(["picobridge-stackcfg", "out.h", "--layout"]);
        assert_eq!(args.out, Some(PathBuf::from("out.h")));
        assert!(args.layout);
        assert!(!args.verbose);
    }
}
