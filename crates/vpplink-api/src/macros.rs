//! Declarative helpers for message bindings.

/// Declare a struct whose fields are encoded in declaration order.
#[macro_export]
macro_rules! wire_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::wire::Encode for $name {
            #[allow(unused_variables)]
            fn encode(&self, dst: &mut $crate::wire::BytesMut) -> $crate::wire::Result<()> {
                $( $crate::wire::Encode::encode(&self.$field, dst)?; )*
                Ok(())
            }
        }

        impl $crate::wire::Decode for $name {
            #[allow(unused_variables)]
            fn decode(src: &mut $crate::wire::Bytes) -> $crate::wire::Result<Self> {
                Ok(Self {
                    $( $field: $crate::wire::Decode::decode(src)?, )*
                })
            }
        }
    };
}

/// Declare a closed enum carried as an integer. The first variant is the
/// default.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $repr:ty {
            $first:ident = $first_val:expr
            $(, $variant:ident = $val:expr )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr($repr)]
        pub enum $name {
            #[default]
            $first = $first_val,
            $( $variant = $val, )*
        }

        impl TryFrom<$repr> for $name {
            type Error = $crate::wire::WireError;

            fn try_from(value: $repr) -> $crate::wire::Result<Self> {
                match value {
                    v if v == $first_val => Ok(Self::$first),
                    $( v if v == $val => Ok(Self::$variant), )*
                    other => Err($crate::wire::WireError::InvalidEnum {
                        name: stringify!($name),
                        value: other as u64,
                    }),
                }
            }
        }

        impl $crate::wire::Encode for $name {
            fn encode(&self, dst: &mut $crate::wire::BytesMut) -> $crate::wire::Result<()> {
                $crate::wire::Encode::encode(&(*self as $repr), dst)
            }
        }

        impl $crate::wire::Decode for $name {
            fn decode(src: &mut $crate::wire::Bytes) -> $crate::wire::Result<Self> {
                let raw = <$repr as $crate::wire::Decode>::decode(src)?;
                Self::try_from(raw)
            }
        }
    };
}

/// Declare an open bit set carried as an integer. Unknown bits survive a
/// decode/encode cycle.
#[macro_export]
macro_rules! wire_flags {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $repr:ty {
            $( const $flag:ident = $val:expr; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub $repr);

        impl $name {
            $( pub const $flag: Self = Self($val); )*

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn bits(self) -> $repr {
                self.0
            }

            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            #[must_use]
            pub const fn without(self, other: Self) -> Self {
                Self(self.0 & !other.0)
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl $crate::wire::Encode for $name {
            fn encode(&self, dst: &mut $crate::wire::BytesMut) -> $crate::wire::Result<()> {
                $crate::wire::Encode::encode(&self.0, dst)
            }
        }

        impl $crate::wire::Decode for $name {
            fn decode(src: &mut $crate::wire::Bytes) -> $crate::wire::Result<Self> {
                Ok(Self(<$repr as $crate::wire::Decode>::decode(src)?))
            }
        }
    };
}

/// Declare a message binding and its role in the exchange protocol.
///
/// ```ignore
/// message! { request ControlPing("control_ping", "51077d14") -> ControlPingReply {} }
/// message! { reply FooReply("foo_reply", "e8d4e804") { pub retval: i32 } }
/// message! { dump FooDump("foo_dump", "51077d14") -> FooDetails { pub sw_if_index: u32 } }
/// message! { details FooDetails("foo_details", "0ad47ad5") { pub sw_if_index: u32 } }
/// ```
///
/// `reply` and `terminator` bodies must declare `retval: i32`.
#[macro_export]
macro_rules! message {
    (
        $(#[$meta:meta])*
        request $name:ident ($msg:literal, $crc:literal) -> $reply:ty { $($body:tt)* }
    ) => {
        $crate::message!(@message $(#[$meta])* Request $name ($msg, $crc) { $($body)* });

        impl $crate::message::Request for $name {
            type Reply = $reply;
        }
    };
    (
        $(#[$meta:meta])*
        dump $name:ident ($msg:literal, $crc:literal) -> $details:ty { $($body:tt)* }
    ) => {
        $crate::message!(@message $(#[$meta])* Request $name ($msg, $crc) { $($body)* });

        impl $crate::message::Dump for $name {
            type Details = $details;
        }
    };
    (
        $(#[$meta:meta])*
        reply $name:ident ($msg:literal, $crc:literal) { $($body:tt)* }
    ) => {
        $crate::message!(@message $(#[$meta])* Reply $name ($msg, $crc) { $($body)* });
        $crate::message!(@retval $name);
    };
    (
        $(#[$meta:meta])*
        terminator $name:ident ($msg:literal, $crc:literal) { $($body:tt)* }
    ) => {
        $crate::message!(@message $(#[$meta])* Terminator $name ($msg, $crc) { $($body)* });
        $crate::message!(@retval $name);
    };
    (
        $(#[$meta:meta])*
        details $name:ident ($msg:literal, $crc:literal) { $($body:tt)* }
    ) => {
        $crate::message!(@message $(#[$meta])* Detail $name ($msg, $crc) { $($body)* });
    };
    (@retval $name:ident) => {
        impl $crate::message::Reply for $name {
            fn retval(&self) -> i32 {
                self.retval
            }
        }
    };
    (
        @message $(#[$meta:meta])* $kind:ident $name:ident ($msg:literal, $crc:literal) { $($body:tt)* }
    ) => {
        $crate::wire_struct! {
            $(#[$meta])*
            pub struct $name { $($body)* }
        }

        impl $crate::message::Message for $name {
            const NAME: &'static str = $msg;
            const CRC: &'static str = $crc;
            const KIND: $crate::message::MessageKind = $crate::message::MessageKind::$kind;
        }
    };
}
