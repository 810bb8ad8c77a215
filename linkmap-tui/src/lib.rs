use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use linkmap_core::config::NodeSizing;
use linkmap_core::graph::display_label;
use linkmap_core::model::NodeStats;
use linkmap_core::pipeline::Analysis;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState, Paragraph, Row,
        Table, TableState, Tabs, Wrap,
    },
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Network,
    Ranking,
    Table,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Network, Tab::Ranking, Tab::Table];

    fn index(self) -> usize {
        match self {
            Tab::Network => 0,
            Tab::Ranking => 1,
            Tab::Table => 2,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Tab::Network => "[1] Network",
            Tab::Ranking => "[2] Top Linked",
            Tab::Table => "[3] Edge Table",
        }
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

pub struct App {
    analysis: Analysis,
    source_name: String,
    /// Nodes sorted by in-degree, most linked first
    nodes: Vec<NodeStats>,
    active_tab: Tab,
    node_state: ListState,
    table_state: TableState,
    should_quit: bool,
}

impl App {
    pub fn new(analysis: Analysis, source_name: impl Into<String>) -> Self {
        let mut nodes = analysis.graph.node_stats(&NodeSizing::default());
        nodes.sort_by(|a, b| b.in_degree.cmp(&a.in_degree));

        let mut node_state = ListState::default();
        if !nodes.is_empty() {
            node_state.select(Some(0));
        }
        let mut table_state = TableState::default();
        if !analysis.edges.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            analysis,
            source_name: source_name.into(),
            nodes,
            active_tab: Tab::Network,
            node_state,
            table_state,
            should_quit: false,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected_node(&self) -> Option<&NodeStats> {
        self.node_state.selected().and_then(|i| self.nodes.get(i))
    }

    pub fn selected_edge(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab | KeyCode::Left => self.active_tab = self.active_tab.previous(),
            KeyCode::Char('1') => self.active_tab = Tab::Network,
            KeyCode::Char('2') => self.active_tab = Tab::Ranking,
            KeyCode::Char('3') => self.active_tab = Tab::Table,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::End => self.move_selection(isize::MAX),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let (len, current) = match self.active_tab {
            Tab::Network => (self.nodes.len(), self.node_state.selected()),
            Tab::Table => (self.analysis.edges.len(), self.table_state.selected()),
            Tab::Ranking => return,
        };
        if len == 0 {
            return;
        }

        let current = current.unwrap_or(0) as isize;
        let next = current.saturating_add(delta).clamp(0, len as isize - 1) as usize;

        match self.active_tab {
            Tab::Network => self.node_state.select(Some(next)),
            Tab::Table => self.table_state.select(Some(next)),
            Tab::Ranking => {}
        }
    }
}

/// Open the interactive viewer for an analysis and block until the user quits
pub fn run(analysis: Analysis, source_name: &str) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(analysis, source_name);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Only process KeyPress events, ignore KeyRelease
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key.code);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(3),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.active_tab {
        Tab::Network => draw_network(f, app, chunks[1]),
        Tab::Ranking => draw_ranking(f, app, chunks[1]),
        Tab::Table => draw_table(f, app, chunks[1]),
    }

    draw_status(f, app, chunks[2]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|t| Line::from(Span::styled(t.title(), Style::default().fg(Color::Green))))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("linkmap - {}", app.source_name)),
        )
        .select(app.active_tab.index())
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        );

    f.render_widget(tabs, area);
}

fn draw_network(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let items: Vec<ListItem> = app
        .nodes
        .iter()
        .map(|node| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4} ", node.in_degree),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(display_label(&node.id)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Pages ({}) by incoming links", app.nodes.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    f.render_stateful_widget(list, chunks[0], &mut app.node_state);

    let detail = match app.selected_node() {
        Some(node) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    node.id.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Incoming links: {}", node.in_degree)),
                Line::from(format!("Outgoing links: {}", node.out_degree)),
                Line::from(""),
                Line::from(Span::styled("Links to:", Style::default().fg(Color::Yellow))),
            ];
            for target in app.analysis.graph.outgoing(&node.id) {
                lines.push(Line::from(format!("  → {}", target)));
            }
            lines
        }
        None => vec![Line::from("No pages")],
    };

    let paragraph = Paragraph::new(detail)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Page"));
    f.render_widget(paragraph, chunks[1]);
}

fn draw_ranking(f: &mut Frame, app: &App, area: Rect) {
    let bars: Vec<Bar> = app
        .analysis
        .ranking
        .iter()
        .map(|ranked| {
            Bar::default()
                .value(ranked.count as u64)
                .label(Line::from(display_label(&ranked.target)))
                .text_value(ranked.count.to_string())
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Top {} pages by incoming links", app.analysis.ranking.len())),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green))
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn draw_table(f: &mut Frame, app: &mut App, area: Rect) {
    let header = Row::new(vec!["Source", "Target", "Anchor_Text"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .analysis
        .edges
        .iter()
        .map(|edge| {
            Row::new(vec![
                edge.source.clone(),
                edge.target.clone(),
                edge.anchor_or_empty().to_string(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("All detected links ({})", app.analysis.edges.len())),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray));

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} links", app.analysis.link_count()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" | {} pages | ", app.analysis.graph.node_count())),
        Span::styled("Tab/1-3", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" switch | "),
        Span::styled("↑↓", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" select | "),
        Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray));

    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkmap_core::{AnalysisOptions, Outcome, analyze_bytes};
    use ratatui::backend::TestBackend;

    fn sample_app() -> App {
        let csv = "Page,URL1,Anchor1,URL2,Anchor2\n\
                   https://ex.com/a,https://ex.com/b,to b,https://ex.com/c,to c\n\
                   https://ex.com/b,https://ex.com/c,to c,,\n\
                   https://ex.com/d,https://ex.com/c,again,https://ex.com/b,b\n";
        match analyze_bytes(csv.as_bytes(), &AnalysisOptions::default()).unwrap() {
            Outcome::Complete(analysis) => App::new(analysis, "sample.csv"),
            Outcome::Empty { .. } => panic!("expected links"),
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_nodes_sorted_by_in_degree() {
        let app = sample_app();
        let selected = app.selected_node().unwrap();
        assert_eq!(selected.id, "https://ex.com/c");
        assert_eq!(selected.in_degree, 3);
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let mut app = sample_app();
        assert_eq!(app.active_tab(), Tab::Network);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_tab(), Tab::Ranking);
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_tab(), Tab::Network);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.active_tab(), Tab::Table);
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.active_tab(), Tab::Ranking);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = sample_app();
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected_edge(), Some(0));
        app.handle_key(KeyCode::End);
        assert_eq!(app.selected_edge(), Some(4));
        app.handle_key(KeyCode::PageDown);
        assert_eq!(app.selected_edge(), Some(4));
        app.handle_key(KeyCode::Home);
        assert_eq!(app.selected_edge(), Some(0));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_render_each_tab() {
        let mut app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        terminal.draw(|f| ui(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Pages (4) by incoming links"));
        assert!(text.contains("Incoming links: 3"));

        app.handle_key(KeyCode::Char('2'));
        terminal.draw(|f| ui(f, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Top 2 pages by incoming links"));

        app.handle_key(KeyCode::Char('3'));
        terminal.draw(|f| ui(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("All detected links (5)"));
        assert!(text.contains("Anchor_Text"));
    }
}
