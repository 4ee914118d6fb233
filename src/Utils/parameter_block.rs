//! Declarative generator for fixed-order scalar parameter blocks.
//!
//! The benchmark passes its parameters as flat arrays with a fixed order.
//! Every block generated here keeps that order in its field list, so the
//! named struct, the flat slice and the name table never drift apart.
//!
//! Generated items:
//! - the struct with one public `f64` field per parameter (serde, `#[serde(default)]`)
//! - `Default` with the listed values
//! - `NAMES`, `from_slice`, `to_vec`, `get`, `set`

macro_rules! parameter_block {
    (
        $(#[$meta:meta])*
        pub struct $name:ident ($block:literal, $err:ident) {
            $( $(#[$fmeta:meta])* $field:ident = $default:expr ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: f64, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $( $field: $default, )* }
            }
        }

        impl $name {
            /// Parameter names in array order.
            pub const NAMES: &'static [&'static str] = &[$( stringify!($field), )*];

            /// Builds the block from a flat array in the fixed order.
            pub fn from_slice(values: &[f64]) -> Result<Self, $err> {
                if values.len() != Self::NAMES.len() {
                    return Err($err::ParameterSizeMismatch {
                        block: $block,
                        expected: Self::NAMES.len(),
                        found: values.len(),
                    });
                }
                let mut values = values.iter().copied();
                Ok(Self { $( $field: values.next().unwrap_or_default(), )* })
            }

            /// Flat array in the fixed order.
            pub fn to_vec(&self) -> Vec<f64> {
                vec![$( self.$field, )*]
            }

            pub fn get(&self, name: &str) -> Option<f64> {
                match name {
                    $( stringify!($field) => Some(self.$field), )*
                    _ => None,
                }
            }

            pub fn set(&mut self, name: &str, value: f64) -> Result<(), $err> {
                match name {
                    $( stringify!($field) => {
                        self.$field = value;
                        Ok(())
                    } )*
                    _ => Err($err::UnknownParameter(name.to_string())),
                }
            }
        }
    };
}

pub(crate) use parameter_block;
