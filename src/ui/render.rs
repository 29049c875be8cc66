use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::layout::layout_regions;
use crate::ui::navigation::ViewName;
use ratatui::widgets::Clear;
use ratatui::Frame;

/// Paint one frame from the current model snapshot.
///
/// Help is drawn on top of the view it was opened over, which is rendered
/// unfocused underneath.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let models = app.models().snapshot();
    let views = app.views();
    let (_, body, footer) = layout_regions(frame.area());

    views.summary.render(frame, &models);
    frame.render_widget(Clear, body);

    let navigation = views.navigation();
    let (base, focused) = match navigation.active {
        ViewName::Help => (
            navigation.previous_view().unwrap_or(ViewName::Channels),
            false,
        ),
        active => (active, true),
    };
    match base {
        ViewName::Channel => views.channel.render(frame, &models, focused),
        _ => views.channels.render(frame, &models, focused),
    }

    let footer_widget = Footer::new(app.keymap(), app.last_error());
    frame.render_widget(footer_widget.widget(footer), footer);

    if navigation.is_help() {
        views.help.render(frame, app.keymap());
    }
}
