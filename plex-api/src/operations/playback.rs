//! Transport commands for the media currently playing

crate::define_player_commands! {
    /// Playback transport control
    commands: Playback,
    operation: PlaybackOperation,
    prefix: "playback",
    variants: {
        Play => "play",
        Pause => "pause",
        Stop => "stop",
        StepForward => "stepForward",
        BigStepForward => "bigStepForward",
        StepBack => "stepBack",
        BigStepBack => "bigStepBack",
        SkipNext => "skipNext",
        SkipPrevious => "skipPrevious",
    }
}
