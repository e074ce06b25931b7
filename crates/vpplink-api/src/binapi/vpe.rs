//! Engine identification.

use crate::message;
use crate::wire::FixedStr;

message! {
    request ShowVersion("show_version", "51077d14") -> ShowVersionReply {}
}

message! {
    reply ShowVersionReply("show_version_reply", "c919bde1") {
        pub retval: i32,
        pub program: FixedStr<32>,
        pub version: FixedStr<32>,
        pub build_date: FixedStr<32>,
        pub build_directory: FixedStr<256>,
    }
}
