//! Interactive terminal editor: two input fields, statistic cards, a scatter
//! chart and the AI insight panel, all driven by [`AppState`] transitions.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset as Series, GraphType, Paragraph, Wrap},
    Frame, Terminal,
};

use covar_core::{Action, AnalysisState, Analyst, AppState, Effect, PlotBounds};

use crate::render::{format_number, LABEL_X, LABEL_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    X,
    Y,
}

struct App {
    state: AppState,
    focus: Field,
    precision: usize,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, precision: usize) -> Self {
        let mut app = Self {
            state,
            focus: Field::X,
            precision,
            should_quit: false,
        };
        app.state.apply(Action::ParseAndCompute);
        app
    }

    fn focused_text(&self) -> &str {
        match self.focus {
            Field::X => &self.state.input_x,
            Field::Y => &self.state.input_y,
        }
    }

    fn edit(&mut self, f: impl FnOnce(&mut String)) {
        let mut text = self.focused_text().to_string();
        f(&mut text);
        let action = match self.focus {
            Field::X => Action::SetInputX(text),
            Field::Y => Action::SetInputY(text),
        };
        self.state.apply(action);
    }

    /// Translate a key press into a transition. Returns the effect the event
    /// loop has to run after redrawing.
    fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('l') if ctrl => {
                self.state.apply(Action::Clear);
            }
            KeyCode::Char('a') if ctrl => return self.state.apply(Action::RequestAnalysis),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Field::X => Field::Y,
                    Field::Y => Field::X,
                };
            }
            KeyCode::Enter => {
                self.state.apply(Action::ParseAndCompute);
            }
            KeyCode::Backspace => self.edit(|t| {
                t.pop();
            }),
            KeyCode::Char(c) if !ctrl => self.edit(|t| t.push(c)),
            _ => {}
        }
        None
    }

    /// Run a pending effect and feed its outcome back through the state
    /// machine.
    fn resolve(&mut self, effect: Effect, analyst: &dyn Analyst) {
        let outcome = effect.run(analyst);
        self.state.dispatch(outcome, analyst);
    }
}

/// Run the editor until the user quits.
pub fn run(analyst: &dyn Analyst, state: AppState, precision: usize) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")?;

    let mut app = App::new(state, precision);
    let res = run_app(&mut terminal, &mut app, analyst);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    analyst: &dyn Analyst,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app)).context("failed to draw")?;
        if app.should_quit {
            return Ok(());
        }

        if !event::poll(Duration::from_millis(100)).context("event poll error")? {
            continue;
        }
        let Event::Key(key) = event::read().context("event read error")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(effect) = app.handle_key(key) {
            // Show the loading panel before blocking on the request.
            terminal.draw(|f| ui(f, app)).context("failed to draw")?;
            app.resolve(effect, analyst);
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn ui(f: &mut Frame<'_>, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(f.area());

    draw_inputs(f, app, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Statistic cards
            Constraint::Min(8),     // Scatter chart
            Constraint::Length(10), // AI insight
        ])
        .split(columns[1]);

    draw_cards(f, app, right[0]);
    draw_chart(f, app, right[1]);
    draw_analysis(f, app, right[2]);
}

fn draw_inputs(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    let field = |title: &'static str, text: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Indexed(99))
        } else {
            Style::default()
        };
        Paragraph::new(text.to_string())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(style),
            )
    };
    f.render_widget(
        field(
            " Variable X (Independent) ",
            &app.state.input_x,
            app.focus == Field::X,
        ),
        rows[0],
    );
    f.render_widget(
        field(
            " Variable Y (Dependent) ",
            &app.state.input_y,
            app.focus == Field::Y,
        ),
        rows[1],
    );

    let mut lines = Vec::new();
    if let Some(err) = &app.state.error {
        lines.push(Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(err.clone(), Style::default().fg(Color::Red)),
        ]));
        lines.push(Line::default());
    }
    lines.extend([
        Line::from("Separate numbers with commas or spaces."),
        Line::default(),
        Line::from("Enter calculate  Tab switch field"),
        Line::from("Ctrl-A analyze   Ctrl-L clear   Esc quit"),
        Line::default(),
        Line::from("Positive: variables move in the same direction."),
        Line::from("Negative: variables move in opposite directions."),
        Line::from("Zero: no linear relationship."),
    ]);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(" How it works ").borders(Borders::ALL)),
        rows[2],
    );
}

fn draw_cards(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(stats) = &app.state.stats else {
        f.render_widget(
            Paragraph::new("Enter data and hit Enter to see results.")
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let num = |v: f64| format_number(v, app.precision);
    let cards = [
        ("Sample Size (N)", stats.n.to_string(), None),
        ("Mean X", num(stats.mean_x), None),
        ("Mean Y", num(stats.mean_y), None),
        (
            "Sample Covariance",
            num(stats.sample_covariance),
            Some(format!("Pop. Cov: {}", num(stats.population_covariance))),
        ),
    ];
    for ((title, value, note), cell) in cards.into_iter().zip(cells.iter()) {
        let mut lines = vec![Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if let Some(note) = note {
            lines.push(Line::from(note));
        }
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .title(format!(" {title} "))
                    .borders(Borders::ALL),
            ),
            *cell,
        );
    }
}

fn draw_chart(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().title(" Scatter ").borders(Borders::ALL);
    let plotted = app
        .state
        .stats
        .as_ref()
        .and_then(|s| PlotBounds::from_dataset(&s.data).map(|b| (s, b)));
    let Some((stats, bounds)) = plotted else {
        f.render_widget(block, area);
        return;
    };

    let points: Vec<(f64, f64)> = stats.data.iter().map(|o| (o.x, o.y)).collect();
    let series = vec![Series::default()
        .name("Data Points")
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Indexed(99)))
        .data(&points)];

    let num = |v: f64| format_number(v, 2);
    let chart = Chart::new(series)
        .block(block)
        .x_axis(
            Axis::default()
                .title(LABEL_X)
                .bounds([bounds.x.min, bounds.x.max])
                .labels([num(bounds.x.min), num(bounds.x.max)]),
        )
        .y_axis(
            Axis::default()
                .title(LABEL_Y)
                .bounds([bounds.y.min, bounds.y.max])
                .labels([num(bounds.y.min), num(bounds.y.max)]),
        );
    f.render_widget(chart, area);
}

fn draw_analysis(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .title(" AI Insight & Interpretation ")
        .borders(Borders::ALL);

    let body = match &app.state.analysis {
        AnalysisState::Idle => Paragraph::new(
            "Press Ctrl-A to get a detailed breakdown of what this covariance means for your data.",
        ),
        AnalysisState::Loading => Paragraph::new("Analyzing statistical relationship..."),
        AnalysisState::Ready(text) => Paragraph::new(text.clone()),
        AnalysisState::Failed(msg) => {
            Paragraph::new(msg.clone()).style(Style::default().fg(Color::Red))
        }
    };
    f.render_widget(body.wrap(Wrap { trim: false }).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use covar_core::{AnalysisError, AnalysisResult, StatisticsResult};
    use ratatui::backend::TestBackend;

    struct Canned(AnalysisResult<String>);

    impl Analyst for Canned {
        fn summarize(&self, _stats: &StatisticsResult) -> AnalysisResult<String> {
            self.0.clone()
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_initial_calculation_renders_cards() {
        let app = App::new(AppState::default(), 4);
        let out = screen(&app);
        assert!(out.contains("Sample Size (N)"));
        assert!(out.contains("Pop. Cov: 4"));
        assert!(out.contains(LABEL_X));
        assert!(out.contains("Press Ctrl-A"));
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut app = App::new(AppState::new("1 2", "3 4"), 4);
        app.handle_key(key(KeyCode::Char(',')));
        app.handle_key(key(KeyCode::Char('5')));
        assert_eq!(app.state.input_x, "1 2,5");

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state.input_y, "3 ");
    }

    #[test]
    fn test_enter_with_bad_input_shows_error() {
        let mut app = App::new(AppState::new("1 2 3", "1 2"), 4);
        assert!(app.state.error.is_some());
        app.handle_key(key(KeyCode::Enter));
        let out = screen(&app);
        assert!(out.contains("Error:"));
        assert!(out.contains("Enter data and hit Enter"));
    }

    #[test]
    fn test_clear_and_quit() {
        let mut app = App::new(AppState::default(), 4);
        app.handle_key(ctrl('l'));
        assert!(app.state.input_x.is_empty());
        assert!(app.state.stats.is_none());
        assert!(!app.should_quit);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_analysis_effect_round_trip() {
        let mut app = App::new(AppState::default(), 4);
        let effect = app.handle_key(ctrl('a')).unwrap();
        assert!(screen(&app).contains("Analyzing statistical relationship..."));

        app.resolve(effect, &Canned(Ok("Strong positive relationship.".into())));
        assert!(!app.state.analysis.is_loading());
        assert!(screen(&app).contains("Strong positive relationship."));
    }

    #[test]
    fn test_analysis_failure_rendered() {
        let mut app = App::new(AppState::default(), 4);
        let effect = app.handle_key(ctrl('a')).unwrap();
        app.resolve(effect, &Canned(Err(AnalysisError::MissingCredential)));
        assert!(screen(&app).contains("no API key configured"));
    }
}
