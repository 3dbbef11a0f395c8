//! Terminal rendering surface
//!
//! Draws whatever `RenderState` the App layer produced. Holds no state of its own.

use ratatui::{prelude::*, widgets::*};

use crate::constants::{APP_NAME, APP_VERSION};
use crate::messages::ui_events::{Field, InputMode};
use crate::messages::RenderState;
use crate::models::{format_amount, AccountSnapshot};

pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(6), // Account
            Constraint::Length(3), // Token
            Constraint::Length(3), // Amount
            Constraint::Min(3),    // Messages
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(f, state, chunks[0]);
    draw_account(f, state, chunks[1]);
    draw_token(f, state, chunks[2]);
    draw_amount(f, state, chunks[3]);
    draw_messages(f, state, chunks[4]);
    draw_status_bar(f, state, chunks[5]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} v{} ", APP_NAME, APP_VERSION),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(format!(" {}", state.base_url), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

/// Lines for the account panel. Only fields present in the snapshot are shown.
pub fn account_lines(snapshot: Option<&AccountSnapshot>) -> Vec<Line<'static>> {
    let Some(snapshot) = snapshot else {
        return vec![Line::from(Span::styled(
            "No account data yet. Enter your token, then press 'r' to refresh.",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let label = Style::default().fg(Color::Gray);
    let mut lines = Vec::new();
    if let Some(account_type) = &snapshot.account_type {
        lines.push(Line::from(vec![
            Span::styled("Account type: ", label),
            Span::raw(account_type.clone()),
        ]));
    }
    if let Some(email) = &snapshot.email {
        lines.push(Line::from(vec![
            Span::styled("Email:        ", label),
            Span::raw(email.clone()),
        ]));
    }
    if let Some(balance) = snapshot.balance {
        lines.push(Line::from(vec![
            Span::styled("Balance:      ", label),
            Span::styled(format_amount(balance), Style::default().fg(Color::Green).bold()),
        ]));
    }
    lines
}

fn draw_account(f: &mut Frame, state: &RenderState, area: Rect) {
    let loading = if state.is_loading { " [...]" } else { "" };
    let updated = state
        .fetched_at
        .map(|t| format!(" updated {} ", t.format("%H:%M:%S")))
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Account{} ", loading))
        .title_bottom(Line::from(updated).right_aligned());

    let account = Paragraph::new(account_lines(state.snapshot.as_ref())).block(block);
    f.render_widget(account, area);
}

fn field_border(state: &RenderState, field: Field) -> Style {
    if state.focus != field {
        Style::default()
    } else if state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn draw_token(f: &mut Frame, state: &RenderState, area: Rect) {
    let marker = if state.token_committed { " [set]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_border(state, Field::Token))
        .title(format!(" Bearer token{} (v: show/hide) ", marker));

    let shown = state.token_display();
    let cursor = shown.chars().count();
    f.render_widget(Paragraph::new(shown).block(block), area);
    place_cursor(f, state, Field::Token, area, cursor);
}

fn draw_amount(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_border(state, Field::Amount))
        .title(format!(" Deposit amount - {} ", state.mode.label()));

    let cursor = state.amount_input.chars().count();
    f.render_widget(Paragraph::new(state.amount_input.as_str()).block(block), area);
    place_cursor(f, state, Field::Amount, area, cursor);
}

fn place_cursor(f: &mut Frame, state: &RenderState, field: Field, area: Rect, len: usize) {
    if state.focus == field && state.input_mode == InputMode::Editing {
        let max_x = area.x.saturating_add(area.width.saturating_sub(2));
        let len = u16::try_from(len).unwrap_or(u16::MAX);
        let cursor_x = area.x.saturating_add(len).saturating_add(1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_messages(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = Vec::new();
    if let Some(error) = &state.error_message {
        lines.push(Line::from(Span::styled(
            format!("✗ {}", error),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(success) = &state.success_message {
        lines.push(Line::from(Span::styled(
            format!("✓ {}", success),
            Style::default().fg(Color::Green),
        )));
    }

    let messages = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Status "))
        .wrap(Wrap { trim: false });
    f.render_widget(messages, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Loading... "
    } else if state.input_mode == InputMode::Editing {
        " ESC/Enter:done | Ctrl+U:clear | Tab:next field "
    } else {
        " Tab:field | e:edit | r:refresh | d:deposit | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 FUNDS DESK - Keyboard Shortcuts

 FIELDS
   Tab / ↑ / ↓        Switch between token and amount
   e / Enter          Edit focused field
   Esc                Stop editing (saves the token)
   Ctrl+U             Clear field while editing
   v                  Show / hide token

 ACCOUNT
   r / f              Refresh balance
   d / s              Deposit the entered amount
   Enter (amount)     Deposit while editing

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
