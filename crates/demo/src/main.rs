//! Replay a pointer session against a demo menu and print the final frame.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context as _, Result, bail};
use clap::{ArgAction, Parser};
use tracing::{Level, info};
use trellis::{
    App, Session, Tree,
    backend::RecordingSurface,
    config::MenuConfig,
    event::Button as PointerButton,
    geom::{Expanse, Point, Rect},
    input::{ButtonSet, PointerState},
    widgets::{Button, Checkbox, Label, Menu, Slider},
};

/// CLI flags for the demo host.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Replay `x y down|up` lines from this file instead of the built-in
    /// session.
    #[clap(short, long)]
    script: Option<PathBuf>,

    /// Load the menu configuration from a JSON file.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity: -v for debug, -vv for trace.
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// A session exercising every widget: hover, click the button, toggle the
/// checkbox, drag the slider, then drag the menu by its title strip.
const BUILTIN: &str = "
150 150 up
78 86 down
78 86 up
35 112 down
35 112 up
128 156 down
180 156 down
180 156 up
60 30 down
100 70 down
100 70 up
";

/// Parse a script into pointer samples. Blank lines and `#` comments are
/// skipped.
fn parse_script(text: &str) -> Result<Vec<PointerState>> {
    let mut samples = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [x, y, state] = parts[..] else {
            bail!("line {}: expected `x y down|up`, got {line:?}", n + 1);
        };
        let x: f32 = x.parse().with_context(|| format!("line {}: bad x", n + 1))?;
        let y: f32 = y.parse().with_context(|| format!("line {}: bad y", n + 1))?;
        let down = match state {
            "down" => true,
            "up" => false,
            other => bail!("line {}: expected down or up, got {other:?}", n + 1),
        };
        samples.push(PointerState {
            position: Point::new(x, y),
            buttons: ButtonSet::none().with(PointerButton::Left, down),
        });
    }
    Ok(samples)
}

/// Build the demo menu under the root.
fn build(tree: &mut Tree, config: MenuConfig) -> trellis::Result<()> {
    let root = tree.root_id();
    tree.set_root_size(Expanse::new(640.0, 480.0))?;
    let menu = tree.add_child(root, Menu::new("Trellis").with_config(config))?;
    tree.set_relative_rect(menu, Rect::new(20.0, 20.0, 260.0, 220.0))?;
    tree.with_widget(menu, |m, ctx| {
        m.begin_layout(8.0, 8.0);
        m.add_widget_with_layout(ctx, Label::new("Overlay demo"), Some(Expanse::new(200.0, 20.0)))?;
        m.add_widget_with_layout(
            ctx,
            Button::new("Apply").with_on_click(|| info!("apply clicked")),
            Some(Expanse::new(100.0, 24.0)),
        )?;
        m.add_widget_with_layout(
            ctx,
            Checkbox::new("Enabled").with_on_toggle(|v| info!(checked = v, "enabled toggled")),
            Some(Expanse::new(150.0, 20.0)),
        )?;
        m.add_widget_with_layout(
            ctx,
            Slider::new(0.0, 100.0, 25.0)
                .with_label("Opacity")
                .with_step(5.0)
                .with_on_change(|v| info!(value = v, "slider moved")),
            Some(Expanse::new(200.0, 40.0)),
        )?;
        m.end_layout();
        Ok(())
    })
}

/// Run the demo.
fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();

    let config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            MenuConfig::from_json(&json)?
        }
        None => MenuConfig::default(),
    };
    let script = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => BUILTIN.to_string(),
    };
    let samples = parse_script(&script)?;

    let mut app = App::new(|tree| build(tree, config))?;
    let mut session = Session::new();
    for sample in samples {
        app.update(&mut session, sample)?;
    }
    info!(ticks = session.tick, "session replayed");

    let mut surface = RecordingSurface::new();
    app.render(&session, &mut surface)?;
    let mut out = io::stdout().lock();
    for cmd in surface.commands() {
        writeln!(out, "{cmd}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scripts() -> Result<()> {
        let s = parse_script("# hover\n1 2 up\n\n3.5 4 down\n")?;
        assert_eq!(s.len(), 2);
        assert_eq!(s[1].position, Point::new(3.5, 4.0));
        assert!(s[1].buttons.left);
        assert!(parse_script("1 2").is_err());
        assert!(parse_script("1 2 sideways").is_err());
        assert!(parse_script("x 2 up").is_err());
        Ok(())
    }

    #[test]
    fn builtin_session_runs() -> Result<()> {
        let mut app = App::new(|tree| build(tree, MenuConfig::default()))?;
        let mut session = Session::new();
        for sample in parse_script(BUILTIN)? {
            app.update(&mut session, sample)?;
        }
        let menu = app.tree().node(app.tree().root_id()).map(|n| n.children()[0]);
        let pos = menu.map(|m| app.tree().absolute_position(m)).transpose()?;
        assert_eq!(pos, Some(Point::new(60.0, 60.0)));
        Ok(())
    }
}
