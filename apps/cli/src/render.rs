//! Renders the markdown review as terminal text.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

const BOLD: &str = "\x1b[1m";
const BOLD_OFF: &str = "\x1b[22m";
const ITALIC: &str = "\x1b[3m";
const ITALIC_OFF: &str = "\x1b[23m";
const UNDERLINE: &str = "\x1b[4m";
const STRIKE: &str = "\x1b[9m";
const STRIKE_OFF: &str = "\x1b[29m";
const CYAN: &str = "\x1b[36m";
const DEFAULT_FG: &str = "\x1b[39m";
const RESET: &str = "\x1b[0m";

/// Renders `markdown` for a terminal. With `ansi` off the output is plain
/// text: H1/H2 headings are underlined with `=`/`-` instead of styled.
pub fn render_markdown(markdown: &str, ansi: bool) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut renderer = Renderer::new(ansi);
    for event in Parser::new_ext(markdown, options) {
        renderer.event(event);
    }

    let mut out = renderer.out.trim_end().to_string();
    out.push('\n');
    out
}

struct Renderer {
    out: String,
    ansi: bool,
    /// One entry per open list: `Some(next number)` for ordered lists.
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
    /// Level and visible width of the heading being written.
    heading: Option<(HeadingLevel, usize)>,
    links: Vec<String>,
    pending_prefix: bool,
}

impl Renderer {
    fn new(ansi: bool) -> Self {
        Self {
            out: String::new(),
            ansi,
            lists: Vec::new(),
            quote_depth: 0,
            in_code_block: false,
            heading: None,
            links: Vec::new(),
            pending_prefix: true,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) | Event::Html(text) => self.write(&text),
            Event::Code(code) => {
                self.style(CYAN);
                if !self.ansi {
                    self.write("`");
                }
                self.write(&code);
                if !self.ansi {
                    self.write("`");
                }
                self.style(DEFAULT_FG);
            }
            Event::SoftBreak => self.write(" "),
            Event::HardBreak => self.newline(),
            Event::Rule => {
                self.blank_line();
                self.write(&"─".repeat(40));
                self.blank_line();
            }
            Event::TaskListMarker(done) => self.write(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(level, _, _) => {
                self.blank_line();
                self.heading = Some((level, 0));
                self.style(BOLD);
                if is_major(level) {
                    self.style(UNDERLINE);
                }
            }
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.blank_line();
                } else {
                    self.newline();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.newline();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.write(&format!("{indent}{marker}"));
            }
            Tag::Emphasis => self.style(ITALIC),
            Tag::Strong => self.style(BOLD),
            Tag::Strikethrough => self.style(STRIKE),
            Tag::BlockQuote => {
                self.blank_line();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.blank_line();
                self.in_code_block = true;
            }
            Tag::Link(_, dest, _) => self.links.push(dest.to_string()),
            Tag::TableHead | Tag::TableRow => self.newline(),
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(level, _, _) => {
                self.style(RESET);
                if let Some((_, width)) = self.heading.take() {
                    if !self.ansi && is_major(level) {
                        let rule = if level == HeadingLevel::H1 { "=" } else { "-" };
                        self.newline();
                        self.write(&rule.repeat(width));
                    }
                }
                self.blank_line();
            }
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.blank_line();
                } else {
                    self.newline();
                }
            }
            Tag::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            Tag::Item => self.newline(),
            Tag::Emphasis => self.style(ITALIC_OFF),
            Tag::Strong => self.style(BOLD_OFF),
            Tag::Strikethrough => self.style(STRIKE_OFF),
            Tag::BlockQuote => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            Tag::CodeBlock(_) => {
                self.in_code_block = false;
                self.blank_line();
            }
            Tag::Link(..) => {
                if let Some(dest) = self.links.pop() {
                    self.write(&format!(" ({dest})"));
                }
            }
            Tag::TableCell => self.write(" │ "),
            Tag::TableHead | Tag::TableRow => self.newline(),
            _ => {}
        }
    }

    fn write(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.out.push('\n');
                self.pending_prefix = true;
            }
            if line.is_empty() {
                continue;
            }
            if self.pending_prefix {
                self.out.push_str(&"│ ".repeat(self.quote_depth));
                if self.in_code_block {
                    self.out.push_str("    ");
                }
                self.pending_prefix = false;
            }
            self.out.push_str(line);
            if let Some((_, width)) = self.heading.as_mut() {
                *width += line.chars().count();
            }
        }
    }

    fn style(&mut self, code: &str) {
        if self.ansi {
            self.out.push_str(code);
        }
    }

    fn newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.pending_prefix = true;
    }

    fn blank_line(&mut self) {
        self.newline();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}

fn is_major(level: HeadingLevel) -> bool {
    matches!(level, HeadingLevel::H1 | HeadingLevel::H2)
}
