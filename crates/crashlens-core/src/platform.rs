//! Platform tags, the auto-detect selector, and the static descriptor table.
//!
//! The string ids (`react-native`, `android-logcat`, `ios-crash`, `flutter`)
//! are stable: they are what users type on the command line, what config files
//! store, and what JSON exports contain.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Format family of a pasted crash log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformTag {
    /// JavaScript-style `at fn (file:line:col)` traces (React Native, Metro, Node)
    #[serde(rename = "react-native")]
    GenericStackTrace,

    /// JVM exceptions as printed by Android's logcat
    #[serde(rename = "android-logcat")]
    JvmException,

    /// Apple-style native crash reports
    #[serde(rename = "ios-crash")]
    NativeCrashReport,

    /// Dart VM stack traces (Flutter)
    #[serde(rename = "flutter")]
    DartStackTrace,
}

impl PlatformTag {
    /// Every tag, in detection precedence order.
    pub const ALL: [PlatformTag; 4] = [
        PlatformTag::GenericStackTrace,
        PlatformTag::JvmException,
        PlatformTag::NativeCrashReport,
        PlatformTag::DartStackTrace,
    ];

    pub fn id(&self) -> &'static str {
        self.descriptor().id
    }

    pub fn label(&self) -> &'static str {
        self.descriptor().label
    }

    pub fn descriptor(&self) -> &'static PlatformDescriptor {
        match self {
            PlatformTag::GenericStackTrace => &PLATFORMS[0],
            PlatformTag::JvmException => &PLATFORMS[1],
            PlatformTag::NativeCrashReport => &PLATFORMS[2],
            PlatformTag::DartStackTrace => &PLATFORMS[3],
        }
    }

    /// All ids, for help text and error messages.
    pub fn ids() -> [&'static str; 4] {
        PlatformTag::ALL.map(|tag| tag.id())
    }
}

impl std::fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PlatformTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PlatformTag::ALL
            .into_iter()
            .find(|tag| tag.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::unknown_platform(wanted, &PlatformTag::ids()))
    }
}

/// Either a fixed platform or "work it out from the text".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformSelector {
    #[default]
    Auto,
    Explicit(PlatformTag),
}

impl PlatformSelector {
    pub const AUTO_ID: &'static str = "auto";

    pub fn is_auto(&self) -> bool {
        matches!(self, PlatformSelector::Auto)
    }
}

impl From<PlatformTag> for PlatformSelector {
    fn from(tag: PlatformTag) -> Self {
        PlatformSelector::Explicit(tag)
    }
}

impl std::fmt::Display for PlatformSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformSelector::Auto => f.write_str(Self::AUTO_ID),
            PlatformSelector::Explicit(tag) => tag.fmt(f),
        }
    }
}

impl FromStr for PlatformSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::AUTO_ID) {
            return Ok(PlatformSelector::Auto);
        }
        s.parse::<PlatformTag>()
            .map(PlatformSelector::Explicit)
            .map_err(|_| {
                let mut expected = vec![Self::AUTO_ID];
                expected.extend(PlatformTag::ids());
                Error::unknown_platform(s.trim(), &expected)
            })
    }
}

/// Static metadata describing one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformDescriptor {
    pub tag: PlatformTag,
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// A short, representative log for this platform
    pub example: &'static str,
    /// Preferred file extension (without dot) for plain-text exports
    pub file_extension: &'static str,
}

/// The compiled-in platform table, in detection precedence order.
pub static PLATFORMS: [PlatformDescriptor; 4] = [
    PlatformDescriptor {
        tag: PlatformTag::GenericStackTrace,
        id: "react-native",
        label: "React Native",
        description: "JavaScript errors from Metro, Hermes, or JSC with `at fn (file:line:col)` frames",
        example: REACT_NATIVE_EXAMPLE,
        file_extension: "txt",
    },
    PlatformDescriptor {
        tag: PlatformTag::JvmException,
        id: "android-logcat",
        label: "Android (Logcat)",
        description: "Java/Kotlin exceptions from `adb logcat`, including AndroidRuntime crashes",
        example: ANDROID_LOGCAT_EXAMPLE,
        file_extension: "log",
    },
    PlatformDescriptor {
        tag: PlatformTag::NativeCrashReport,
        id: "ios-crash",
        label: "iOS Crash Report",
        description: "Symbolicated or raw Apple crash reports with thread backtraces and binary images",
        example: IOS_CRASH_EXAMPLE,
        file_extension: "crash",
    },
    PlatformDescriptor {
        tag: PlatformTag::DartStackTrace,
        id: "flutter",
        label: "Flutter",
        description: "Dart VM stack traces with `#N fn (package:...)` frames and async gaps",
        example: FLUTTER_EXAMPLE,
        file_extension: "log",
    },
];

const REACT_NATIVE_EXAMPLE: &str = "\
TypeError: Cannot read property 'map' of undefined

This error is located at:
    in ProductList (at App.js:42)
    at ProductList (http://localhost:8081/index.bundle?platform=ios&dev=true:118432:27)
    at renderWithHooks (/app/node_modules/react-native/Libraries/Renderer/implementations/ReactNativeRenderer-dev.js:14803:27)
    at /app/node_modules/react-native/Libraries/Core/setUpErrorHandling.js:24:9";

const ANDROID_LOGCAT_EXAMPLE: &str = "\
--------- beginning of crash
E/AndroidRuntime( 4521): FATAL EXCEPTION: main
E/AndroidRuntime( 4521): Process: com.example.shop, PID: 4521
E/AndroidRuntime( 4521): java.lang.RuntimeException: Unable to start activity ComponentInfo{com.example.shop/com.example.shop.MainActivity}
E/AndroidRuntime( 4521): \tat android.app.ActivityThread.performLaunchActivity(ActivityThread.java:3449)
E/AndroidRuntime( 4521): \tat java.lang.reflect.Method.invoke(Native Method)
E/AndroidRuntime( 4521): Caused by: java.lang.NullPointerException: Attempt to invoke virtual method 'int java.lang.String.length()' on a null object reference
E/AndroidRuntime( 4521): \tat com.example.shop.MainActivity.onCreate(MainActivity.kt:42)
E/AndroidRuntime( 4521): \t... 11 more";

const IOS_CRASH_EXAMPLE: &str = "\
Incident Identifier: 6A8E2D4C-1F3B-4E5A-9C7D-2B1A0F9E8D7C
Hardware Model:      iPhone14,2
Exception Type:  EXC_BAD_ACCESS (SIGSEGV)
Exception Codes: KERN_INVALID_ADDRESS at 0x0000000000000010
Triggered by Thread:  0

Thread 0 Crashed:
0   libobjc.A.dylib                 0x00000001a2b4c3d0 objc_msgSend + 16
1   MyApp                           0x0000000100a1b2c4 -[ProfileViewController viewDidLoad] + 120
2   UIKitCore                       0x00000001a9c3d4e8 -[UIViewController loadViewIfRequired] + 1012

Thread 1:
0   libsystem_kernel.dylib          0x00000001d2e3f4a8 __workq_kernreturn + 8

Binary Images:
0x100a10000 - 0x100b2ffff MyApp arm64  <3f2e1d0c9b8a7f6e5d4c3b2a19080706> /private/var/containers/Bundle/Application/MyApp.app/MyApp";

const FLUTTER_EXAMPLE: &str = "\
Unhandled Exception: Null check operator used on a null value
#0      _CartPageState.build (package:shop/cart/cart_page.dart:57:31)
#1      StatefulElement.build (package:flutter/src/widgets/framework.dart:5409:27)
#2      _rootRunUnary (dart:async/zone.dart:1406:47)
<asynchronous suspension>
#3      main (package:shop/main.dart:12:3)";
