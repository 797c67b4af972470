//! Trigger values that select which transitions are candidates.

use std::borrow::Cow;
use std::fmt::Debug;

/// Trait for values that fire transitions.
///
/// A trigger is compared for equality against the trigger of every
/// outgoing transition of the current state. The `name` is used for
/// logging, default transition labels, and diagram export.
///
/// Implementations are provided for strings, integers, `char` and `bool`.
/// Enums can use the [`trigger_enum!`](crate::trigger_enum) macro.
///
/// # Example
///
/// ```rust
/// use active_machine::core::Trigger;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum DoorTrigger {
///     Open,
///     Close,
/// }
///
/// impl Trigger for DoorTrigger {
///     fn name(&self) -> std::borrow::Cow<'_, str> {
///         match self {
///             Self::Open => "Open".into(),
///             Self::Close => "Close".into(),
///         }
///     }
/// }
///
/// assert_eq!(DoorTrigger::Open.name(), "Open");
/// ```
pub trait Trigger: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Human-readable name of the trigger.
    fn name(&self) -> Cow<'_, str>;
}

impl Trigger for String {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Trigger for &'static str {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

macro_rules! display_trigger {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Trigger for $ty {
                fn name(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

display_trigger!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, char, bool);
