//! Macros for declaring entity event enumerations.

/// Generate an event enum, its kind enum, and both trait impls.
///
/// Variants may be unit or struct-like. The kind enum mirrors the variants as
/// unit tags; kind names come from the variant identifiers.
///
/// # Example
///
/// ```
/// use entity_machine::event_enum;
///
/// event_enum! {
///     pub enum ParcelEvent kinds ParcelEventKind {
///         Register { weight_grams: u32 },
///         Dispatch,
///         Deliver { signed_by: String },
///     }
/// }
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident kinds $kind:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $({ $($field:ident : $ty:ty),* $(,)? })?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $({ $($field: $ty),* })?
            ),*
        }

        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $kind {
            $($variant),*
        }

        impl $crate::core::EventKind for $kind {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl $crate::core::Event for $name {
            type Kind = $kind;

            fn kind(&self) -> $kind {
                match self {
                    $(Self::$variant { .. } => $kind::$variant),*
                }
            }
        }
    };
}
