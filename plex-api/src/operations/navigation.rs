//! Remote-control navigation commands

crate::define_player_commands! {
    /// Menu navigation, as sent by a remote control
    commands: Navigation,
    operation: NavigationOperation,
    prefix: "navigation",
    variants: {
        MoveUp => "moveUp",
        MoveDown => "moveDown",
        MoveLeft => "moveLeft",
        MoveRight => "moveRight",
        PageUp => "pageUp",
        PageDown => "pageDown",
        NextLetter => "nextLetter",
        PreviousLetter => "previousLetter",
        Select => "select",
        Back => "back",
        ContextMenu => "contextMenu",
        ToggleOsd => "toggleOSD",
    }
}
