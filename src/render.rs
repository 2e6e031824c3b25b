//! Text rendering shared by the terminal and web front ends.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::api::AppResult;
use crate::error::FailureKind;
use crate::session::{EXAMPLE_QUERIES, SearchFailure, SearchSnapshot, SearchState};

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const RESET: &str = "\x1b[0m";

pub const CARD_WIDTH: usize = 76;

/// `round(score * 100)`, clamped to 0..=100. Non-finite scores render as 0.
pub fn match_percent(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn results_heading(count: usize) -> String {
    format!("{count} sonuç bulundu")
}

pub fn match_label(score: f64) -> String {
    format!("%{} eşleşme", match_percent(score))
}

/// Drops control characters (escape sequences included) from server text
/// bound for a terminal. Newlines survive.
pub fn terminal_safe(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect()
}

/// Store descriptions often carry HTML fragments; flatten and wrap them.
pub fn clean_description(raw: &str, width: usize) -> String {
    match html2text::from_read(raw.as_bytes(), width.max(20)) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "description is not renderable html, using raw text");
            raw.trim().to_string()
        }
    }
}

pub fn failure_message(failure: &SearchFailure) -> String {
    match (failure.kind, failure.status) {
        (FailureKind::Server, Some(status)) => {
            format!("Arama başarısız oldu: sunucu HTTP {status} döndürdü.")
        }
        (FailureKind::Server, None) => "Arama başarısız oldu: sunucu hata döndürdü.".to_string(),
        (FailureKind::Transport, _) => "Arama servisine ulaşılamadı.".to_string(),
        (FailureKind::Malformed, _) => "Arama servisinden geçersiz yanıt alındı.".to_string(),
    }
}

/// Whether a link target may be emitted as-is: relative, or an http(s) or
/// mailto URL.
fn is_safe_link(dest: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme.
    let cleaned: String = dest
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    match cleaned.split_once(':') {
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => matches!(
            scheme.to_ascii_lowercase().as_str(),
            "http" | "https" | "mailto"
        ),
        _ => true,
    }
}

/// Markdown analysis as HTML. Raw HTML in the input is escaped, not passed
/// through, and link or image targets with other schemes become `#`.
pub fn analysis_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_link(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: "#".into(),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_link(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: "#".into(),
            title,
            id,
        }),
        other => other,
    });
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

#[derive(Debug, Clone, Copy)]
enum Style {
    Bold,
    Italic,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Bold => BOLD,
            Style::Italic => ITALIC,
        }
    }
}

struct TerminalWriter {
    out: String,
    styles: Vec<Style>,
    // Next number for ordered lists, None for bullet lists.
    lists: Vec<Option<u64>>,
}

impl TerminalWriter {
    fn push_style(&mut self, style: Style) {
        self.styles.push(style);
        self.out.push_str(style.code());
    }

    fn pop_style(&mut self) {
        self.styles.pop();
        self.out.push_str(RESET);
        for style in &self.styles {
            self.out.push_str(style.code());
        }
    }

    fn end_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn start_item(&mut self) {
        self.end_line();
        let depth = self.lists.len().saturating_sub(1);
        self.out.push_str(&"  ".repeat(depth));
        match self.lists.last_mut() {
            Some(Some(n)) => {
                self.out.push_str(&format!("{n}. "));
                *n += 1;
            }
            _ => self.out.push_str("• "),
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Strong) => self.push_style(Style::Bold),
            Event::Start(Tag::Emphasis) => self.push_style(Style::Italic),
            Event::Start(Tag::Heading { .. }) => {
                self.end_line();
                self.push_style(Style::Bold);
            }
            Event::Start(Tag::List(start)) => {
                self.end_line();
                self.lists.push(start);
            }
            Event::Start(Tag::Item) => self.start_item(),
            Event::End(TagEnd::Strong) | Event::End(TagEnd::Emphasis) => self.pop_style(),
            Event::End(TagEnd::Heading(_)) => {
                self.pop_style();
                self.out.push_str("\n\n");
            }
            Event::End(TagEnd::Paragraph) => {
                if self.lists.is_empty() {
                    self.out.push_str("\n\n");
                } else {
                    self.end_line();
                }
            }
            Event::End(TagEnd::Item) => self.end_line(),
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.end_line();
                    self.out.push('\n');
                }
            }
            Event::Text(text) | Event::Code(text) => self.out.push_str(&terminal_safe(&text)),
            Event::Html(raw) | Event::InlineHtml(raw) => self.out.push_str(&terminal_safe(&raw)),
            Event::SoftBreak | Event::HardBreak => self.out.push('\n'),
            Event::Rule => {
                self.end_line();
                self.out.push_str(&"─".repeat(40));
                self.out.push_str("\n\n");
            }
            _ => {}
        }
    }
}

/// Markdown analysis for a terminal: bold and italics become ANSI styles,
/// list items get bullets or numbers, markup punctuation is dropped.
pub fn analysis_to_terminal(markdown: &str) -> String {
    let mut writer = TerminalWriter {
        out: String::new(),
        styles: Vec::new(),
        lists: Vec::new(),
    };
    for event in Parser::new(markdown) {
        writer.event(event);
    }
    writer.out.trim_end().to_string()
}

pub fn render_card(app: &AppResult) -> String {
    let mut card = format!(
        "{}  ({})",
        terminal_safe(&app.name),
        terminal_safe(&app.developer)
    );
    if let Some(rating) = app.rating {
        card.push_str(&format!("  ★ {rating:.1}"));
        if let Some(reviews) = app.review_count {
            card.push_str(&format!(" ({reviews} değerlendirme)"));
        }
    }
    card.push('\n');

    let description = terminal_safe(&clean_description(&app.description, CARD_WIDTH - 2));
    for line in description.lines() {
        card.push_str("  ");
        card.push_str(line);
        card.push('\n');
    }

    let mut footer = vec![format!("[{}]", terminal_safe(&app.category))];
    if let Some(downloads) = &app.download_count {
        footer.push(format!("⬇ {}", terminal_safe(downloads)));
    }
    if let Some(price) = &app.price {
        footer.push(terminal_safe(price));
    }
    footer.push(match_label(app.similarity_score));
    card.push_str("  ");
    card.push_str(&footer.join("  "));
    card
}

pub fn render_examples() -> String {
    let mut out = String::from("Örnek Arama Sorguları\n");
    for (i, example) in EXAMPLE_QUERIES.iter().enumerate() {
        out.push_str(&format!("  {}. {example}\n", i + 1));
    }
    out.trim_end().to_string()
}

fn render_snapshot(snapshot: &SearchSnapshot) -> String {
    let mut sections = Vec::new();

    if !snapshot.analysis.trim().is_empty() {
        sections.push(format!(
            "{BOLD}AI Analizi{RESET}\n{}",
            analysis_to_terminal(&snapshot.analysis)
        ));
    }

    if !snapshot.results.is_empty() {
        let count = snapshot.results.len();
        let mut heading = results_heading(count);
        if snapshot.total_found != count as u64 {
            heading.push_str(&format!(" (toplam {})", snapshot.total_found));
        }
        let cards: Vec<String> = snapshot.results.iter().map(render_card).collect();
        sections.push(format!("{BOLD}{heading}{RESET}\n\n{}", cards.join("\n\n")));
    }

    if snapshot.results.is_empty() {
        sections.push(format!("Sonuç bulunamadı.\n\n{}", render_examples()));
    }
    sections.join("\n\n")
}

/// Terminal view of a session state.
pub fn render_state(state: &SearchState) -> String {
    match state {
        SearchState::Idle => render_examples(),
        SearchState::Loading => "Aranıyor...".to_string(),
        SearchState::Populated(snapshot) => render_snapshot(snapshot),
        SearchState::Failed(failure) => {
            format!("{}\n\n{}", failure_message(failure), render_examples())
        }
    }
}
