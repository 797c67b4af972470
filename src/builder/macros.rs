//! Macros for ergonomic trigger declarations.

/// Declare a fieldless enum and implement [`Trigger`](crate::core::Trigger)
/// for it, using the variant names as trigger names.
///
/// # Example
///
/// ```
/// use active_machine::core::Trigger;
/// use active_machine::trigger_enum;
///
/// trigger_enum! {
///     pub enum DoorTrigger {
///         Open,
///         Close,
///         Lock,
///     }
/// }
///
/// assert_eq!(DoorTrigger::Lock.name(), "Lock");
/// ```
#[macro_export]
macro_rules! trigger_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Trigger for $name {
            fn name(&self) -> ::std::borrow::Cow<'_, str> {
                match self {
                    $(Self::$variant => ::std::borrow::Cow::Borrowed(stringify!($variant))),*
                }
            }
        }
    };
}
