//! Generates the error enums shared by the repository and capability ports.
//!
//! Every port failure carries a free-form `message` describing the adapter's
//! cause. A declaration names each variant and its context; the macro derives
//! the enum, a `thiserror` display of `"<context>: <message>"`, a snake-case
//! constructor per variant accepting anything `Into<String>`, and a
//! `message()` accessor.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum SessionPersistenceError {
//!         Connection => "session repository connection failed",
//!         Query => "session repository query failed",
//!     }
//! }
//!
//! let err = SessionPersistenceError::query("deadlock");
//! assert_eq!(err.to_string(), "session repository query failed: deadlock");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $context:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error("{}: {message}", $context)]
                $variant { message: String },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                }
            )+

            /// Adapter-supplied cause, without the variant's context.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message.as_str(),)+
                }
            }
        }
    };
}

pub(crate) use define_port_error;
