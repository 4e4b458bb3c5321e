//! Remote-control convenience methods shared by players and devices

/// Expands to one method per navigation and playback command
///
/// The surrounding type must provide `navigation(Navigation)` and
/// `playback(Playback)`.
macro_rules! remote_control_methods {
    ($($method:ident => $send:ident($family:ident::$command:ident)),+ $(,)?) => {
        $(
            pub fn $method(&self) -> $crate::error::Result<()> {
                self.$send(plex_api::$family::$command)
            }
        )+
    };
    () => {
        remote_control_methods! {
            move_up => navigation(Navigation::MoveUp),
            move_down => navigation(Navigation::MoveDown),
            move_left => navigation(Navigation::MoveLeft),
            move_right => navigation(Navigation::MoveRight),
            page_up => navigation(Navigation::PageUp),
            page_down => navigation(Navigation::PageDown),
            next_letter => navigation(Navigation::NextLetter),
            previous_letter => navigation(Navigation::PreviousLetter),
            select => navigation(Navigation::Select),
            back => navigation(Navigation::Back),
            context_menu => navigation(Navigation::ContextMenu),
            toggle_osd => navigation(Navigation::ToggleOsd),
            play => playback(Playback::Play),
            pause => playback(Playback::Pause),
            stop => playback(Playback::Stop),
            step_forward => playback(Playback::StepForward),
            big_step_forward => playback(Playback::BigStepForward),
            step_back => playback(Playback::StepBack),
            big_step_back => playback(Playback::BigStepBack),
            skip_next => playback(Playback::SkipNext),
            skip_previous => playback(Playback::SkipPrevious),
        }
    };
}

pub(crate) use remote_control_methods;
