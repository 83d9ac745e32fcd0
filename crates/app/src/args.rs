//! Positional argument binding for typed definitions.

use logmsg_domain::{LogValue, ToLogValue};

/// A fixed-size positional argument list, implemented for tuples of up to
/// six [`ToLogValue`] elements.
///
/// The tuple type of a definition fixes its arity at compile time, so a call
/// can never supply the wrong number of values. The trait is sealed: the tuple
/// impls below are the only ones.
pub trait LogArgs: sealed::Sealed {
    /// Number of positional values.
    const ARITY: usize;

    /// Capture every element, in order.
    fn into_values(self) -> Vec<LogValue>;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_log_args {
    ($arity:literal; $($name:ident : $index:tt),*) => {
        impl<$($name: ToLogValue),*> sealed::Sealed for ($($name,)*) {}

        impl<$($name: ToLogValue),*> LogArgs for ($($name,)*) {
            const ARITY: usize = $arity;

            fn into_values(self) -> Vec<LogValue> {
                vec![$(self.$index.to_log_value()),*]
            }
        }
    };
}

impl_log_args!(0;);
impl_log_args!(1; T0: 0);
impl_log_args!(2; T0: 0, T1: 1);
impl_log_args!(3; T0: 0, T1: 1, T2: 2);
impl_log_args!(4; T0: 0, T1: 1, T2: 2, T3: 3);
impl_log_args!(5; T0: 0, T1: 1, T2: 2, T3: 3, T4: 4);
impl_log_args!(6; T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5);

#[cfg(test)]
mod tests {
    use super::*;

    fn arity_of<A: LogArgs>(_: &A) -> usize {
        A::ARITY
    }

    #[test]
    fn tuples_report_their_arity() {
        assert_eq!(arity_of(&()), 0);
        assert_eq!(arity_of(&("a",)), 1);
        assert_eq!(arity_of(&(1, 2, 3, 4, 5, 6)), 6);
    }

    #[test]
    fn values_keep_positional_order() {
        let values = ("home", 10_u8, None::<i32>).into_values();
        assert_eq!(
            values,
            [
                LogValue::Str("home".into()),
                LogValue::UInt(10),
                LogValue::Null,
            ]
        );
        assert!(().into_values().is_empty());
    }
}
