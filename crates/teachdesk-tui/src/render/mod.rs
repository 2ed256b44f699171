//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use teachdesk_app::{AppState, Screen};

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI.
///
/// Pure function of the state; modals are drawn last over the whole frame.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);

    frame.render_widget(
        widgets::MainHeader::new(state.screen, state.has_api_key()),
        areas.header,
    );

    match state.screen {
        Screen::Landing => frame.render_widget(widgets::Landing, areas.body),
        Screen::Home => {
            frame.render_widget(widgets::Home::new(state.saved_lessons.len()), areas.body)
        }
        Screen::CreateNew => frame.render_widget(
            widgets::CreateFormView::new(&state.create_form, state.is_loading_on(Screen::CreateNew)),
            areas.body,
        ),
        Screen::MatchStyle => frame.render_widget(
            widgets::MatchFormView::new(&state.match_form, state.is_loading_on(Screen::MatchStyle)),
            areas.body,
        ),
        Screen::Result => {
            if let Some(result) = &state.result {
                frame.render_widget(
                    widgets::ResultView::new(result).generating_image(state.is_generating_image()),
                    areas.body,
                );
            }
        }
        Screen::MyLessons => frame.render_widget(
            widgets::LessonsList::new(&state.saved_lessons, state.selected_lesson),
            areas.body,
        ),
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.footer);

    if state
        .result
        .as_ref()
        .is_some_and(|r| r.show_share_options)
    {
        frame.render_widget(widgets::ShareMenu, area);
    }
    if let Some(confirm) = &state.confirm_delete {
        frame.render_widget(widgets::ConfirmDialog::new(confirm), area);
    }
    if let Some(prompt) = &state.key_prompt {
        frame.render_widget(widgets::KeyPrompt::new(prompt), area);
    }
}
