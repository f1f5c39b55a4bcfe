use anyhow::Context;
use std::env;
use std::io::{self, Write};

use swatch_core::color::{self, rgba_to_hex_digits};
use swatch_core::input::{parse_hsl_list, parse_rgba_list};
use swatch_core::{
    ColorEntry, ExportFormat, HslField, PaletteStore, RgbaField, Session, StoreConfig,
};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!(
        r#"Swatch CLI

            Commands:
            list [palettes.json]
            add-palette <name> [palettes.json]
            rename-palette <palette_id> <name> [palettes.json]
            remove-palette <palette_id> [palettes.json]
            add-color <palette_id> <name> <hex> [palettes.json]
            rename-color <palette_id> <color_id> <name> [palettes.json]
            remove-color <palette_id> <color_id> [palettes.json]
            convert <hex | r,g,b[,a] | hsl:h,s,l>
            repl [palettes.json]

            Without a file argument, $SWATCH_DATA_FILE or the per-user data
            directory is used.

            Examples:
            cargo run -p swatch_cli -- add-palette "Brand"
            cargo run -p swatch_cli -- add-color 0 "Signal Red" FF0000
            cargo run -p swatch_cli -- convert hsl:210,50,40
            cargo run -p swatch_cli -- repl demo.json
        "#
    );
}

fn open_store(file: Option<&String>) -> anyhow::Result<PaletteStore> {
    let config = StoreConfig::resolve_with(file.map(String::as_str))
        .context("resolve palette file location")?;
    tracing::debug!(path = %config.data_file.display(), "using palette file");
    Ok(PaletteStore::open_file(&config))
}

fn parse_id(arg: Option<&String>, what: &str) -> anyhow::Result<usize> {
    arg.with_context(|| format!("missing <{what}>"))?
        .parse()
        .with_context(|| format!("{what} must be a number"))
}

fn describe(color: &ColorEntry) -> String {
    let c = color.rgba();
    let h = color.hsl();
    format!(
        "#{:<8} | rgba({}, {}, {}, {}) | hsl({}, {}, {})",
        rgba_to_hex_digits(c),
        c.r,
        c.g,
        c.b,
        c.a,
        h.hue(),
        h.saturation(),
        h.lightness()
    )
}

fn print_palettes(store: &PaletteStore) {
    if store.is_empty() {
        println!("(no palettes yet)");
        return;
    }
    for p in store.palettes() {
        println!("#{:>2} {} ({} colors)", p.id(), p.name(), p.len());
        for e in p.entries() {
            println!("    {:>2} | {:<16} | {}", e.id(), e.name(), describe(e));
        }
    }
}

fn report_save(store: &PaletteStore) {
    if let Some(err) = store.last_save_error() {
        println!("warning: change not saved: {err}");
    }
}

/// Parse `convert` / `set` input into a color: hex digits, an rgba list, or `hsl:` list.
fn parse_color_arg(text: &str) -> anyhow::Result<ColorEntry> {
    let rgba = if let Some(rest) = text.strip_prefix("hsl:") {
        color::hsl_to_rgba(parse_hsl_list(rest)?)
    } else if text.contains(',') {
        parse_rgba_list(text)?
    } else {
        color::hex_to_rgba(&swatch_core::input::filter_hex_input(text))
    };
    Ok(ColorEntry::create(0, "converted", rgba))
}

fn repl(file: Option<&String>) -> anyhow::Result<()> {
    let mut session = Session::new(open_store(file)?);

    println!("Loaded {} palette(s).", session.store.len());
    println!("Type 'help' for commands. 'quit' to exit.");

    loop {
        print!("swatch> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF (Ctrl+D)
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        // edits are reported, never fatal
        if let Err(e) = repl_command(&mut session, &cmd, &parts) {
            println!("error: {e:#}");
        }
        if cmd == "quit" || cmd == "exit" {
            break;
        }
    }

    Ok(())
}

fn repl_command(session: &mut Session, cmd: &str, parts: &[&str]) -> anyhow::Result<()> {
    match cmd {
        "help" => {
            println!(
                r#"Commands:
                    show                       (working color)
                    hex <digits>
                    rgba <r,g,b[,a]>
                    r|g|b|a <0..255>
                    hsl <h,s,l>
                    h <0..359>  s|l <0..100>
                    copy hex|rgba|hsl|swift
                    palettes
                    palette add <name...>
                    palette rename <id> <name...>
                    palette remove <id>
                    color add <palette_id> <name...>     (commits working color)
                    color rename <palette_id> <color_id> <name...>
                    color remove <palette_id> <color_id>
                    color pick <palette_id> <color_id>   (load into working color)
                    quit
                    "#
            );
        }
        "quit" | "exit" => {}

        "show" => println!("{}", describe(session.working())),

        "hex" => {
            let digits = session.set_working_hex(parts.get(1).copied().unwrap_or(""));
            println!("hex={digits} -> {}", describe(session.working()));
        }

        "rgba" => {
            let text = parts[1..].join(" ");
            session.set_working_rgba(parse_rgba_list(&text)?);
            println!("{}", describe(session.working()));
        }

        "r" | "g" | "b" | "a" => {
            let Some(value) = parts.get(1) else {
                println!("Usage: {cmd} <0..255>");
                return Ok(());
            };
            session.set_working_rgba_field(cmd.parse::<RgbaField>()?, value)?;
            println!("{}", describe(session.working()));
        }

        "hsl" => {
            let text = parts[1..].join(" ");
            session.set_working_hsl(parse_hsl_list(&text)?);
            println!("{}", describe(session.working()));
        }

        "h" | "s" | "l" => {
            let Some(value) = parts.get(1) else {
                println!("Usage: {cmd} <value>");
                return Ok(());
            };
            session.set_working_hsl_field(cmd.parse::<HslField>()?, value)?;
            println!("{}", describe(session.working()));
        }

        "copy" => {
            let format: ExportFormat = parts.get(1).copied().unwrap_or("hex").parse()?;
            println!("{}", format.render(session.working()));
        }

        "palettes" | "list" => print_palettes(&session.store),

        "palette" => {
            let sub = parts.get(1).map(|s| s.to_lowercase()).unwrap_or_default();
            match sub.as_str() {
                "add" if parts.len() >= 3 => {
                    let id = session.store.add_palette(parts[2..].join(" "), Vec::new());
                    println!("Added palette #{id}");
                }
                "rename" if parts.len() >= 4 => {
                    let id: usize = parts[2].parse().context("palette id must be a number")?;
                    session.store.rename_palette(parts[3..].join(" "), id)?;
                    println!("Renamed palette #{id}");
                }
                "remove" if parts.len() == 3 => {
                    let id: usize = parts[2].parse().context("palette id must be a number")?;
                    let removed = session.store.remove_palette(id)?;
                    println!("Removed palette '{}'", removed.name());
                }
                _ => println!("Usage: palette add|rename|remove ..."),
            }
            report_save(&session.store);
        }

        "color" => {
            let sub = parts.get(1).map(|s| s.to_lowercase()).unwrap_or_default();
            let palette_id: Option<usize> = parts.get(2).and_then(|s| s.parse().ok());
            match (sub.as_str(), palette_id) {
                ("add", Some(pid)) if parts.len() >= 4 => {
                    let name = parts[3..].join(" ");
                    let id = session.add_working_color_to_palette(name, pid)?;
                    println!("Added color #{id} to palette #{pid}");
                }
                ("rename", Some(pid)) if parts.len() >= 5 => {
                    let cid: usize = parts[3].parse().context("color id must be a number")?;
                    session.store.rename_color_at(pid, cid, parts[4..].join(" "))?;
                    println!("Renamed color #{cid}");
                }
                ("remove", Some(pid)) if parts.len() == 4 => {
                    let cid: usize = parts[3].parse().context("color id must be a number")?;
                    let removed = session.store.remove_color_at(pid, cid)?;
                    println!("Removed color '{}'", removed.name());
                }
                ("pick", Some(pid)) if parts.len() == 4 => {
                    let cid: usize = parts[3].parse().context("color id must be a number")?;
                    let picked = session
                        .store
                        .palette(pid)
                        .and_then(|p| p.color(cid))
                        .cloned()
                        .with_context(|| format!("no color #{cid} in palette #{pid}"))?;
                    session.pick(&picked);
                    println!("{}", describe(session.working()));
                }
                _ => println!("Usage: color add|rename|remove|pick <palette_id> ..."),
            }
            report_save(&session.store);
        }

        _ => println!("Unknown command. Type 'help'."),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "list" => {
            let store = open_store(args.get(2))?;
            print_palettes(&store);
        }
        "add-palette" => {
            let name = args.get(2).context("missing <name>")?;
            let mut store = open_store(args.get(3))?;
            let id = store.add_palette(name, Vec::new());
            report_save(&store);
            println!("Added palette #{id} '{name}'");
        }
        "rename-palette" => {
            let id = parse_id(args.get(2), "palette_id")?;
            let name = args.get(3).context("missing <name>")?;
            let mut store = open_store(args.get(4))?;
            store.rename_palette(name, id)?;
            report_save(&store);
            println!("Renamed palette #{id} to '{name}'");
        }
        "remove-palette" => {
            let id = parse_id(args.get(2), "palette_id")?;
            let mut store = open_store(args.get(3))?;
            let removed = store.remove_palette(id)?;
            report_save(&store);
            println!("Removed palette '{}'", removed.name());
        }
        "add-color" => {
            let palette_id = parse_id(args.get(2), "palette_id")?;
            let name = args.get(3).context("missing <name>")?;
            let hex = args.get(4).context("missing <hex>")?;
            let mut session = Session::new(open_store(args.get(5))?);
            let digits = session.set_working_hex(hex);
            let id = session.add_working_color_to_palette(name, palette_id)?;
            report_save(&session.store);
            println!("Added color #{id} '{name}' (#{digits}) to palette #{palette_id}");
        }
        "rename-color" => {
            let palette_id = parse_id(args.get(2), "palette_id")?;
            let color_id = parse_id(args.get(3), "color_id")?;
            let name = args.get(4).context("missing <name>")?;
            let mut store = open_store(args.get(5))?;
            store.rename_color_at(palette_id, color_id, name)?;
            report_save(&store);
            println!("Renamed color #{color_id} in palette #{palette_id} to '{name}'");
        }
        "remove-color" => {
            let palette_id = parse_id(args.get(2), "palette_id")?;
            let color_id = parse_id(args.get(3), "color_id")?;
            let mut store = open_store(args.get(4))?;
            let removed = store.remove_color_at(palette_id, color_id)?;
            report_save(&store);
            println!("Removed color '{}' from palette #{palette_id}", removed.name());
        }
        "convert" => {
            let text = args.get(2).context("missing <color>")?;
            let entry = parse_color_arg(text)?;
            for format in ExportFormat::ALL {
                println!("{:<6} {}", format.to_string(), format.render(&entry));
            }
        }
        "repl" => {
            repl(args.get(2))?;
        }
        "version" => println!("swatch {}", swatch_core::version()),

        _ => print_help(),
    }

    Ok(())
}
