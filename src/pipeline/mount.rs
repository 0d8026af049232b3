//! Mount API - Hosts a page and its sticker in the terminal.
//!
//! The loop renders the page's viewport, waits for input until the next
//! timer is due, then advances the page clock by the wall time that passed
//! and forwards fired timers to the sticker.
//!
//! # Example
//!
//! ```ignore
//! use spark_sticky::pipeline::mount;
//!
//! // Option 1: Run blocking event loop
//! mount::run(&mut page, &mut sticker)?;
//!
//! // Option 2: Drive the page yourself
//! let control = mount::handle_event(&mut page, &mut sticker, event);
//! mount::tick(&mut page, &mut sticker, elapsed);
//! ```

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use tracing::debug;

use crate::document::Page;
use crate::renderer::{paint, DiffRenderer};
use crate::sticky::Sticker;

/// Poll timeout while no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

// =============================================================================
// Loop Control
// =============================================================================

/// What the loop does after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

// =============================================================================
// Terminal Guard
// =============================================================================

/// Raw mode + alternate screen for the guard's lifetime.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best effort
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// =============================================================================
// Event Handling
// =============================================================================

/// Apply one terminal event to the page.
///
/// Scroll keys move the page, resizes resize the viewport and refresh the
/// sticker's clones. `q`, Esc and Ctrl+C quit.
pub fn handle_event(page: &mut Page, sticker: &mut Sticker, event: Event) -> LoopControl {
    match event {
        Event::Key(key) => handle_key(page, key),
        Event::Resize(width, height) => {
            if !page.set_viewport_size(width, height).is_empty() {
                sticker.handle_resize(page);
            }
            LoopControl::Continue
        }
        _ => LoopControl::Continue,
    }
}

fn handle_key(page: &mut Page, key: KeyEvent) -> LoopControl {
    if key.kind == KeyEventKind::Release {
        return LoopControl::Continue;
    }

    let page_step = (page.viewport_size().1.saturating_sub(1)).max(1) as f32;

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return LoopControl::Quit;
        }
        KeyCode::Char('q') | KeyCode::Esc => return LoopControl::Quit,
        KeyCode::Up | KeyCode::Char('k') => {
            page.scroll_by(-1.0);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            page.scroll_by(1.0);
        }
        KeyCode::PageUp => {
            page.scroll_by(-page_step);
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            page.scroll_by(page_step);
        }
        KeyCode::Home => {
            page.set_scroll_top(0.0);
        }
        KeyCode::End => {
            let bottom = page.max_scroll_top();
            page.set_scroll_top(bottom);
        }
        _ => {}
    }
    LoopControl::Continue
}

/// Advance the page clock and forward fired timers to the sticker.
///
/// Returns the number of timers that fired.
pub fn tick(page: &mut Page, sticker: &mut Sticker, elapsed: Duration) -> usize {
    let fired = page.advance(elapsed);
    for timer in &fired {
        sticker.handle_timer(page, *timer);
    }
    fired.len()
}

// =============================================================================
// Run Loop
// =============================================================================

/// Run the page in the terminal until the user quits.
pub fn run(page: &mut Page, sticker: &mut Sticker) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    let (width, height) = terminal::size()?;
    handle_event(page, sticker, Event::Resize(width, height));
    debug!(width, height, "mounted");

    run_loop(page, sticker, &mut stdout)
}

fn run_loop<W: Write>(page: &mut Page, sticker: &mut Sticker, out: &mut W) -> io::Result<()> {
    let mut renderer = DiffRenderer::new();
    let mut last_tick = Instant::now();

    loop {
        renderer.render(out, &paint(page))?;

        let timeout = page.next_due().unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            let event = event::read()?;
            if matches!(event, Event::Resize(..)) {
                renderer.invalidate();
            }
            if handle_event(page, sticker, event) == LoopControl::Quit {
                break;
            }
        }

        let now = Instant::now();
        tick(page, sticker, now - last_tick);
        last_tick = now;
    }

    debug!("unmounted");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
