//! Feed list and user-page rendering.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_HEADER, COLOR_LIKED, COLOR_MUTED, COLOR_SELECTION_BG,
};
use crate::app::App;
use crate::feed::LikeState;
use crate::models::Posting;

pub fn render_feed_screen(frame: &mut Frame, app: &App) {
    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let header = Paragraph::new("Home")
        .style(Style::default().fg(COLOR_HEADER).bold())
        .block(Block::default().borders(Borders::BOTTOM).border_style(COLOR_BORDER));
    frame.render_widget(header, rows[0]);

    render_post_list(frame, rows[1], app);
    render_key_hints(
        frame,
        rows[2],
        "[j/k] Move  [l] Like  [d] Delete  [o] Author  [n] New  [m] My page  [p] Password  [x] Logout  [q] Quit",
    );
}

pub fn render_profile_screen(frame: &mut Frame, app: &App, user_name: &str) {
    let rows = Layout::vertical([
        Constraint::Length(9),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .split(frame.area());

    render_profile_header(frame, rows[0], app, user_name);
    render_post_list(frame, rows[1], app);

    let hints = if app.viewing_own_page() {
        "[j/k] Move  [l] Like  [d] Delete  [i] Edit intro  [D] Delete account  [Esc] Home"
    } else {
        "[j/k] Move  [l] Like  [f] Follow/unfollow  [o] Author  [Esc] Home"
    };
    render_key_hints(frame, rows[2], hints);
}

fn render_profile_header(frame: &mut Frame, area: Rect, app: &App, user_name: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(if app.viewing_own_page() {
            "My Page"
        } else {
            "User Page"
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    match app.profile.as_ref() {
        Some(profile) => {
            let mut name_line = vec![Span::styled(
                profile.user_name.clone(),
                Style::default().fg(COLOR_HEADER).bold(),
            )];
            if !app.viewing_own_page() {
                let follow = match app.following {
                    Some(true) => "  following",
                    Some(false) => "  not following",
                    None => "",
                };
                name_line.push(Span::styled(follow, Style::default().fg(COLOR_ACCENT)));
            }
            lines.push(Line::from(name_line));
            lines.push(Line::styled(
                format!("since {}", profile.created_date()),
                Style::default().fg(COLOR_MUTED),
            ));
            lines.push(Line::from(format!(
                "posts {}   likes given {}   likes received {}   follows {}   followers {}",
                profile.posting_count,
                profile.like_count,
                profile.liked_count,
                profile.follow_count,
                profile.followed_count
            )));
            match app.intro_draft.as_ref() {
                Some(draft) => {
                    lines.push(Line::styled(
                        format!("intro: {}\u{2588}  [Enter] Save  [Esc] Discard", draft),
                        Style::default().fg(COLOR_ACCENT),
                    ));
                }
                None => {
                    lines.push(Line::from(format!("intro: {}", profile.self_introduction)));
                }
            }
        }
        None => {
            lines.push(Line::styled(
                format!("Loading {} ...", user_name),
                Style::default().fg(COLOR_MUTED),
            ));
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_post_list(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = match app.pager.as_ref() {
        Some(pager) => pager
            .items()
            .iter()
            .map(|p| post_item(app, p))
            .collect(),
        None => Vec::new(),
    };

    if items.is_empty() {
        let text = if app.loading_page {
            "Loading ..."
        } else {
            "No postings yet"
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(COLOR_MUTED))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let footer = if app.loading_page {
        " Loading ... "
    } else if app.pager.as_ref().map(|p| p.has_more()).unwrap_or(false) {
        " j to load more "
    } else {
        " end of feed "
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title_bottom(footer),
        )
        .highlight_style(Style::default().bg(COLOR_SELECTION_BG));

    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn post_item(app: &App, posting: &Posting) -> ListItem<'static> {
    let date = posting.uploaded_at.format("%Y-%m-%d").to_string();
    let pending = app
        .like_controls
        .get(&posting.posting_id)
        .map(|c| c.state() == LikeState::Pending)
        .unwrap_or(false);
    let heart = if pending {
        Span::styled("\u{2661}?", Style::default().fg(COLOR_MUTED))
    } else if posting.liked {
        Span::styled("\u{2665}", Style::default().fg(COLOR_LIKED))
    } else {
        Span::styled("\u{2661}", Style::default().fg(COLOR_MUTED))
    };
    let own = Some(posting.user_name.as_str()) == app.session.login_user_name();
    let mut meta = vec![
        Span::styled(
            posting.user_name.clone(),
            Style::default().fg(COLOR_ACCENT),
        ),
        Span::styled(format!("  {}  ", date), Style::default().fg(COLOR_MUTED)),
        heart,
        Span::raw(format!(" {}", posting.liked_count)),
    ];
    if own {
        meta.push(Span::styled("  (yours)", Style::default().fg(COLOR_MUTED)));
    }
    if app.deleting.contains(&posting.posting_id) {
        meta.push(Span::styled(
            "  deleting...",
            Style::default().fg(COLOR_MUTED),
        ));
    }
    ListItem::new(vec![
        Line::from(meta),
        Line::from(format!("  {}", posting.title)),
        Line::styled(
            format!("  {}", posting.image_url),
            Style::default().fg(COLOR_MUTED),
        ),
    ])
}

fn render_key_hints(frame: &mut Frame, area: Rect, hints: &str) {
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(COLOR_MUTED)),
        area,
    );
}
