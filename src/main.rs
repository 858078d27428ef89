use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tugwar::config::{help_text, load_config, parse_args, CliCommand, Config};
use tugwar::input::{handle_event, InputResult};
use tugwar::tug::{TugSession, FRAME_MS};
use tugwar::utils::{build_info, logging};

type Backend = CrosstermBackend<io::Stdout>;

fn main() -> io::Result<()> {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Play(options)) => options,
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Ok(CliCommand::Help) => {
            println!("{}", help_text());
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'tugwar --help' for usage.");
            std::process::exit(1);
        }
    };

    // Logging is best effort; the game runs without it
    let log_path = logging::init_logging().ok();

    let mut config = match load_config(options.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) if options.config_path.is_some() => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            log::warn!("Ignoring config: {}", e);
            Config::default()
        }
    };
    config.apply_cli(&options);

    if let Some(path) = &log_path {
        log::info!(
            "Starting {}, variant {}, log at {}",
            build_info::version_line(),
            config.variant.name(),
            path.display()
        );
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    log::debug!("Keyboard release events requested: {}", enhanced_keys);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config);

    // Cleanup terminal, even when the loop failed
    if enhanced_keys {
        let _ = terminal.backend_mut().execute(PopKeyboardEnhancementFlags);
    }
    let _ = terminal.backend_mut().execute(DisableMouseCapture);
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Game loop failed: {}", e);
    }
    result
}

/// Frame loop: draw, wait for input until the next frame is due, advance.
fn run(terminal: &mut Terminal<Backend>, config: &Config) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut session = TugSession::new(config.variant, config.tuning);
    let key_label = config.pull_key_label();

    let frame_interval = Duration::from_millis(FRAME_MS);
    let started_at = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        let now_ms = started_at.elapsed().as_millis() as u64;
        terminal.draw(|frame| {
            tugwar::ui::draw(frame, &session.game, &session.tally, now_ms, &key_label);
        })?;

        let timeout = frame_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let event = event::read()?;
            match handle_event(&event, &mut session.game, config.pull_key) {
                InputResult::Quit => break,
                InputResult::Restarted => last_tick = Instant::now(),
                InputResult::Continue => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame_interval {
            session.tick(elapsed.as_millis() as u64, &mut rng);
            last_tick = Instant::now();
        }
    }

    log::info!("Quit after {} rounds", session.tally.rounds());
    Ok(())
}
