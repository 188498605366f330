//! Common utilities

pub mod diag;

/// Defines an enum of newtype variants with `From` impls for each payload
macro_rules! define_enum {
    (
        $( #[ $meta:meta ] )*
        $vis:vis $ty:ident = $( $variant:ident($payload:ident) )|* ;
    ) => {
        $( #[$meta] )*
        $vis enum $ty {
            $( $variant($payload), )*
        }

        $(
            impl From<$payload> for $ty {
                fn from(x: $payload) -> $ty {
                    Self::$variant(x)
                }
            }
        )*
    }
}

pub(crate) use define_enum;
