#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use fltk::{app, enums::Event, prelude::*};
use tracing_subscriber::EnvFilter;

use tab_pad::app::domain::messages::Message;
use tab_pad::app::domain::settings::AppSettings;
use tab_pad::app::state::AppState;
use tab_pad::ui::main_window::build_main_window;
use tab_pad::ui::menu::build_menu;
#[cfg(target_os = "windows")]
use tab_pad::ui::theme::set_windows_titlebar_theme;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let (settings, settings_err) = AppSettings::load();
    init_logging(&settings.log_level);
    if let Some(e) = settings_err {
        tracing::warn!("{}", e);
    }
    tracing::info!("starting TabPad v{}", env!("CARGO_PKG_VERSION"));

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let theme = settings.theme_mode.resolve();
    let mut widgets = build_main_window(&settings, &sender);
    let theme_menu_index = build_menu(&mut widgets.menu, &sender, theme);

    // Window close button goes through the same path as File/Exit
    widgets.wind.set_callback(move |_| {
        if app::event() == Event::Close {
            sender.send(Message::WindowClose);
        }
    });

    let mut state = AppState::new(widgets, &settings, theme, theme_menu_index);
    state.window.show();
    #[cfg(target_os = "windows")]
    set_windows_titlebar_theme(&state.window, state.theme);

    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        tracing::trace!(?msg, "dispatch");
        match msg {
            Message::TabNew => state.new_tab(),
            Message::FileOpen => state.file_open(),
            Message::FileSave => state.file_save(),
            Message::TabCloseActive => state.close_active_tab(),
            Message::TabRenameActive => state.rename_active_tab(),
            Message::TabNext => state.next_tab(),
            Message::TabPrevious => state.prev_tab(),
            Message::FileQuit | Message::WindowClose => {
                tracing::info!("quitting");
                app.quit();
            }

            Message::TabSwitch(id) => state.switch_to_document(id),
            Message::TabClose(id) => state.close_tab(id),
            Message::TabRename(id) => state.rename_tab(id),

            Message::EditCut => state.cut(),
            Message::EditCopy => state.copy(),
            Message::EditPaste => state.paste(),
            Message::ApplyStyle(style) => state.apply_style(style),

            Message::EditUndo => state.undo(),
            Message::EditRedo => state.redo(),

            Message::ToggleTheme => state.toggle_theme(),
        }
    }
}
