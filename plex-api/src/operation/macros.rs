//! Declarative macro for argument-less player commands
//!
//! Navigation and playback commands differ only in their path. Instead of one
//! struct per command, a family of commands becomes one enum plus a single
//! operation type that carries the enum as its request.

/// Define a family of argument-less player commands
///
/// # Example
/// ```rust,ignore
/// define_player_commands! {
///     /// Remote-control navigation
///     commands: Navigation,
///     operation: NavigationOperation,
///     prefix: "navigation",
///     variants: {
///         MoveUp => "moveUp",
///         MoveDown => "moveDown",
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_player_commands {
    (
        $(#[$meta:meta])*
        commands: $commands:ident,
        operation: $operation:ident,
        prefix: $prefix:literal,
        variants: {
            $($variant:ident => $name:literal),+ $(,)?
        } $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $commands {
            $($variant,)+
        }

        impl $commands {
            /// Every command in this family
            pub const ALL: &'static [$commands] = &[$($commands::$variant,)+];

            /// Wire name of the command
            pub fn name(&self) -> &'static str {
                match self {
                    $($commands::$variant => $name,)+
                }
            }

            /// Command path relative to the player root
            pub fn path(&self) -> &'static str {
                match self {
                    $($commands::$variant => concat!($prefix, "/", $name),)+
                }
            }
        }

        impl std::fmt::Display for $commands {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.path())
            }
        }

        pub struct $operation;

        impl $crate::operation::PlayerOperation for $operation {
            type Request = $commands;
            type Response = ();

            const NAME: &'static str = stringify!($commands);

            fn path(request: &Self::Request) -> &'static str {
                request.path()
            }

            fn build_query(_request: &Self::Request) -> Vec<$crate::Pair> {
                Vec::new()
            }

            fn parse_response(_xml: Option<&$crate::Element>) -> $crate::error::Result<()> {
                Ok(())
            }
        }
    };
}
