//! Script interpreter: walks parse pairs into finalized icons.
//!
//! The walk is depth-first and strictly in document order. The interpreter
//! owns a stack of [`DrawingContext`] values (copy-on-push scoping) and the
//! icon currently under construction; finalized icons are append-only.
//!
//! Recoverable input problems (missing Y component, figure command outside
//! an icon, undefined variable) are warned about and skipped; the walk
//! never aborts on them.

use std::collections::HashMap;

use pest::iterators::Pair;

use crate::Rule;
use crate::figure::{DrawingContext, Figure, Icon, Position};
use crate::log::warn;

/// Naming an icon `%temp` keeps it eligible for an auto-generated name.
pub const PLACEHOLDER_NAME: &str = "temp";

/// Cap on `@variable` expansion nesting, so cyclic definitions fail loudly
/// instead of recursing forever.
const MAX_EXPANSION_DEPTH: usize = 10;

/// Icon being populated between its opening and closing brace.
struct IconInProgress {
    name: Option<String>,
    figures: Vec<Figure>,
}

/// Stateful walker over a parsed script.
///
/// Each interpreter owns its unnamed-icon counter, so independent runs in
/// one process never share naming state.
pub struct Interpreter<'i> {
    stack: Vec<DrawingContext>,
    icons: Vec<Icon>,
    current: Option<IconInProgress>,
    unnamed_counter: u32,
    variables: HashMap<String, Pair<'i, Rule>>,
}

impl Default for Interpreter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'i> Interpreter<'i> {
    pub fn new() -> Self {
        Self {
            stack: vec![DrawingContext::default()],
            icons: Vec::new(),
            current: None,
            unnamed_counter: 0,
            variables: HashMap::new(),
        }
    }

    /// Interpret a parsed `script` pair into the ordered icon list.
    pub fn run(mut self, script: Pair<'i, Rule>) -> Vec<Icon> {
        for item in script.into_inner() {
            match item.as_rule() {
                Rule::assignment => self.define_variable(item),
                Rule::icon => self.walk_icon(item),
                Rule::EOI => {}
                other => unreachable!("unexpected rule at script level: {other:?}"),
            }
        }
        self.icons
    }

    fn define_variable(&mut self, pair: Pair<'i, Rule>) {
        let mut inner = pair.into_inner();
        let name = inner
            .next()
            .expect("assignment has an identifier")
            .as_str()
            .to_string();
        let commands = inner.next().expect("assignment has a command list");
        if self.variables.insert(name.clone(), commands).is_some() {
            warn!("variable `{name}` redefined");
        }
    }

    fn walk_icon(&mut self, pair: Pair<'i, Rule>) {
        self.enter_icon();
        for commands in pair.into_inner() {
            self.walk_commands(commands, 0);
        }
        self.exit_icon();
    }

    fn walk_commands(&mut self, commands: Pair<'i, Rule>, depth: usize) {
        for command in commands.into_inner() {
            self.walk_command(command, depth);
        }
    }

    fn walk_command(&mut self, command: Pair<'i, Rule>, depth: usize) {
        let inner = command
            .into_inner()
            .next()
            .expect("command wraps one alternative");
        match inner.as_rule() {
            Rule::name => self.set_name(inner),
            Rule::scope => {
                self.enter_scope();
                for commands in inner.into_inner() {
                    self.walk_commands(commands, depth);
                }
                self.exit_scope();
            }
            Rule::line => self.draw_line(inner),
            Rule::rectangle => self.draw_rectangle(inner),
            Rule::circle => self.draw_circle(inner),
            Rule::arc => self.draw_arc(inner),
            Rule::set_position => {
                let position = inner.into_inner().next().expect("set_position operand");
                self.resolve_position(position);
            }
            Rule::set_width => self.set_width(inner),
            Rule::add_mode => self.context_mut().union_mode = true,
            Rule::remove_mode => self.context_mut().union_mode = false,
            Rule::VARIABLE => self.expand_variable(inner, depth),
            other => unreachable!("unexpected rule in command: {other:?}"),
        }
    }

    // ------------------------------------------------------------------
    // Context stack
    // ------------------------------------------------------------------

    fn context(&self) -> &DrawingContext {
        self.stack.last().expect("context stack is never empty")
    }

    fn context_mut(&mut self) -> &mut DrawingContext {
        self.stack.last_mut().expect("context stack is never empty")
    }

    fn enter_scope(&mut self) {
        let top = *self.context();
        self.stack.push(top);
    }

    fn exit_scope(&mut self) {
        assert!(
            self.stack.len() > 1,
            "scope exit with no matching scope entry"
        );
        self.stack.pop();
    }

    // ------------------------------------------------------------------
    // Icon lifecycle
    // ------------------------------------------------------------------

    fn enter_icon(&mut self) {
        self.current = Some(IconInProgress {
            name: None,
            figures: Vec::new(),
        });
    }

    fn exit_icon(&mut self) {
        let icon = self
            .current
            .take()
            .expect("icon exit with no icon under construction");
        let name = match icon.name {
            Some(name) if name != PLACEHOLDER_NAME => name,
            _ => {
                let id = self.unnamed_counter;
                self.unnamed_counter += 1;
                format!("icon_{id}")
            }
        };
        if self.icons.iter().any(|existing| existing.name == name) {
            warn!("icon `{name}` already defined");
        }
        self.icons.push(Icon {
            name,
            figures: icon.figures,
        });
        // Drawing state resets with icon completion, not with scope exit.
        self.stack = vec![DrawingContext::default()];
    }

    fn set_name(&mut self, pair: Pair<'i, Rule>) {
        let name = pair
            .into_inner()
            .next()
            .expect("name has an identifier")
            .as_str()
            .to_string();
        match &mut self.current {
            Some(icon) => icon.name = Some(name),
            None => warn!("name command outside of an icon"),
        }
    }

    // ------------------------------------------------------------------
    // Coordinate resolution
    // ------------------------------------------------------------------

    /// Resolve a `position` pair against the current context and overwrite
    /// the current position with the result.
    ///
    /// Each point of a multi-point command goes through here in turn, so a
    /// relative point resolves against the previous point's result.
    fn resolve_position(&mut self, pair: Pair<'i, Rule>) -> Position {
        let mut relative = false;
        let mut components = Vec::with_capacity(2);
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::relative => relative = true,
                Rule::FLOAT => components.push(part.as_str()),
                other => unreachable!("unexpected rule in position: {other:?}"),
            }
        }
        let x = parse_float(components.first().copied().unwrap_or("0"));
        let y = match components.get(1) {
            Some(text) => parse_float(text),
            None => {
                warn!("position has no Y component, defaulting to 0");
                0.0
            }
        };
        let resolved = if relative {
            self.context().position + Position::new(x, y)
        } else {
            Position::new(x, y)
        };
        self.context_mut().position = resolved;
        resolved
    }

    fn set_width(&mut self, pair: Pair<'i, Rule>) {
        let literal = pair.into_inner().next().expect("set_width operand");
        self.context_mut().width = parse_float(literal.as_str());
    }

    // ------------------------------------------------------------------
    // Figure commands
    // ------------------------------------------------------------------

    fn push_figure(&mut self, figure: Figure) {
        match &mut self.current {
            Some(icon) => icon.figures.push(figure),
            None => warn!("figure command with no icon under construction, dropping it"),
        }
    }

    fn draw_line(&mut self, pair: Pair<'i, Rule>) {
        let mut filled = false;
        let mut positions = Vec::new();
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::line_kw => filled = part.as_str() == "lf",
                Rule::position => {
                    let point = self.resolve_position(part);
                    positions.push(point);
                }
                other => unreachable!("unexpected rule in line: {other:?}"),
            }
        }
        let width = self.context().width;
        self.push_figure(Figure::Line {
            positions,
            filled,
            width,
        });
    }

    fn draw_rectangle(&mut self, pair: Pair<'i, Rule>) {
        let mut corners = pair.into_inner();
        let start = self.resolve_position(corners.next().expect("rectangle start corner"));
        let end = self.resolve_position(corners.next().expect("rectangle end corner"));
        let width = self.context().width;
        self.push_figure(Figure::Rectangle { start, end, width });
    }

    fn draw_circle(&mut self, pair: Pair<'i, Rule>) {
        let mut inner = pair.into_inner();
        let center = self.resolve_position(inner.next().expect("circle center"));
        let radius = parse_float(inner.next().expect("circle radius").as_str());
        let width = self.context().width;
        self.push_figure(Figure::Circle {
            center,
            radius,
            width,
        });
    }

    fn draw_arc(&mut self, pair: Pair<'i, Rule>) {
        let mut inner = pair.into_inner();
        let center = self.resolve_position(inner.next().expect("arc center"));
        let radius = parse_float(inner.next().expect("arc radius").as_str());
        let start_angle = parse_float(inner.next().expect("arc start angle").as_str());
        let end_angle = parse_float(inner.next().expect("arc end angle").as_str());
        let width = self.context().width;
        self.push_figure(Figure::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            width,
        });
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    /// Replay a stored command list in the current context.
    fn expand_variable(&mut self, pair: Pair<'i, Rule>, depth: usize) {
        let name = &pair.as_str()[1..];
        if depth >= MAX_EXPANSION_DEPTH {
            warn!("variable expansion depth exceeded at `@{name}`");
            return;
        }
        match self.variables.get(name) {
            Some(commands) => {
                let commands = commands.clone();
                self.walk_commands(commands, depth + 1);
            }
            None => warn!("variable `@{name}` is not defined"),
        }
    }
}

/// Parse a numeric literal as f32. The grammar only admits well-formed
/// floats, but out-of-range text still defaults to 0 with a warning
/// rather than aborting the walk.
fn parse_float(text: &str) -> f32 {
    text.parse().unwrap_or_else(|_| {
        warn!("malformed numeric literal `{text}`, defaulting to 0");
        0.0
    })
}
