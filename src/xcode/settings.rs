//! Build settings for the Debug and Release profiles.
//!
//! Project configurations carry compiler, warning and SDK settings; target
//! configurations carry the product settings. Keys are kept sorted, which is
//! also how Xcode writes them.

use std::collections::BTreeMap;

use crate::ctx::Project;

pub type BuildSettings = BTreeMap<&'static str, Setting>;

#[derive(Clone, Debug, PartialEq)]
pub enum Setting {
  Value(String),
  List(Vec<String>)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
  Debug,
  Release
}

pub const PROFILES: &[Profile] = &[Profile::Debug, Profile::Release];

/// Configuration used when building from the command line.
pub const DEFAULT_PROFILE: Profile = Profile::Release;

impl Profile {
  pub fn to_str(self) -> &'static str {
    match self {
      Profile::Debug   => "Debug",
      Profile::Release => "Release"
    }
  }
}

const PROJECT_COMMON: &[(&str, &str)] = &[
  ("ALWAYS_SEARCH_USER_PATHS",                            "NO"),
  ("CLANG_ANALYZER_NONNULL",                              "YES"),
  ("CLANG_ANALYZER_NUMBER_OBJECT_CONVERSION",             "YES_AGGRESSIVE"),
  ("CLANG_CXX_LANGUAGE_STANDARD",                         "gnu++20"),
  ("CLANG_ENABLE_MODULES",                                "YES"),
  ("CLANG_ENABLE_OBJC_ARC",                               "YES"),
  ("CLANG_ENABLE_OBJC_WEAK",                              "YES"),
  ("CLANG_WARN_BLOCK_CAPTURE_AUTORELEASING",              "YES"),
  ("CLANG_WARN_BOOL_CONVERSION",                          "YES"),
  ("CLANG_WARN_COMMA",                                    "YES"),
  ("CLANG_WARN_CONSTANT_CONVERSION",                      "YES"),
  ("CLANG_WARN_DEPRECATED_OBJC_IMPLEMENTATIONS",          "YES"),
  ("CLANG_WARN_DIRECT_OBJC_ISA_USAGE",                    "YES_ERROR"),
  ("CLANG_WARN_DOCUMENTATION_COMMENTS",                   "YES"),
  ("CLANG_WARN_EMPTY_BODY",                               "YES"),
  ("CLANG_WARN_ENUM_CONVERSION",                          "YES"),
  ("CLANG_WARN_INFINITE_RECURSION",                       "YES"),
  ("CLANG_WARN_INT_CONVERSION",                           "YES"),
  ("CLANG_WARN_NON_LITERAL_NULL_CONVERSION",              "YES"),
  ("CLANG_WARN_OBJC_IMPLICIT_RETAIN_SELF",                "YES"),
  ("CLANG_WARN_OBJC_LITERAL_CONVERSION",                  "YES"),
  ("CLANG_WARN_OBJC_ROOT_CLASS",                          "YES_ERROR"),
  ("CLANG_WARN_QUOTED_INCLUDE_IN_FRAMEWORK_HEADER",       "YES"),
  ("CLANG_WARN_RANGE_LOOP_ANALYSIS",                      "YES"),
  ("CLANG_WARN_STRICT_PROTOTYPES",                        "YES"),
  ("CLANG_WARN_SUSPICIOUS_MOVE",                          "YES"),
  ("CLANG_WARN_UNGUARDED_AVAILABILITY",                   "YES_AGGRESSIVE"),
  ("CLANG_WARN_UNREACHABLE_CODE",                         "YES"),
  ("CLANG_WARN__DUPLICATE_METHOD_MATCH",                  "YES"),
  ("COPY_PHASE_STRIP",                                    "NO"),
  ("ENABLE_STRICT_OBJC_MSGSEND",                          "YES"),
  ("GCC_C_LANGUAGE_STANDARD",                             "gnu11"),
  ("GCC_NO_COMMON_BLOCKS",                                "YES"),
  ("GCC_WARN_64_TO_32_BIT_CONVERSION",                    "YES"),
  ("GCC_WARN_ABOUT_RETURN_TYPE",                          "YES_ERROR"),
  ("GCC_WARN_UNDECLARED_SELECTOR",                        "YES"),
  ("GCC_WARN_UNINITIALIZED_AUTOS",                        "YES_AGGRESSIVE"),
  ("GCC_WARN_UNUSED_FUNCTION",                            "YES"),
  ("GCC_WARN_UNUSED_VARIABLE",                            "YES"),
  ("MTL_FAST_MATH",                                       "YES"),
  ("SDKROOT",                                             "iphoneos")
];

const PROJECT_DEBUG: &[(&str, &str)] = &[
  ("DEBUG_INFORMATION_FORMAT",            "dwarf"),
  ("ENABLE_TESTABILITY",                  "YES"),
  ("GCC_DYNAMIC_NO_PIC",                  "NO"),
  ("GCC_OPTIMIZATION_LEVEL",              "0"),
  ("MTL_ENABLE_DEBUG_INFO",               "INCLUDE_SOURCE"),
  ("ONLY_ACTIVE_ARCH",                    "YES"),
  ("SWIFT_ACTIVE_COMPILATION_CONDITIONS", "DEBUG"),
  ("SWIFT_OPTIMIZATION_LEVEL",            "-Onone")
];

const PROJECT_RELEASE: &[(&str, &str)] = &[
  ("DEBUG_INFORMATION_FORMAT", "dwarf-with-dsym"),
  ("ENABLE_NS_ASSERTIONS",     "NO"),
  ("MTL_ENABLE_DEBUG_INFO",    "NO"),
  ("SWIFT_COMPILATION_MODE",   "wholemodule"),
  ("SWIFT_OPTIMIZATION_LEVEL", "-O"),
  ("VALIDATE_PRODUCT",         "YES")
];

const TARGET_COMMON: &[(&str, &str)] = &[
  ("ASSETCATALOG_COMPILER_APPICON_NAME",                          "AppIcon"),
  ("ASSETCATALOG_COMPILER_GLOBAL_ACCENT_COLOR_NAME",              "AccentColor"),
  ("CODE_SIGN_STYLE",                                             "Automatic"),
  ("CURRENT_PROJECT_VERSION",                                     "1"),
  ("GENERATE_INFOPLIST_FILE",                                     "NO"),
  ("INFOPLIST_KEY_UIApplicationSupportsIndirectInputEvents",      "YES"),
  ("INFOPLIST_KEY_UILaunchScreen_Generation",                     "YES"),
  ("INFOPLIST_KEY_UISupportedInterfaceOrientations",
   "UIInterfaceOrientationPortrait UIInterfaceOrientationLandscapeLeft UIInterfaceOrientationLandscapeRight"),
  ("INFOPLIST_KEY_UISupportedInterfaceOrientations_iPad",
   "UIInterfaceOrientationPortrait UIInterfaceOrientationPortraitUpsideDown UIInterfaceOrientationLandscapeLeft UIInterfaceOrientationLandscapeRight"),
  ("PRODUCT_NAME",                                                "$(TARGET_NAME)"),
  ("SWIFT_VERSION",                                               "5.0"),
  ("TARGETED_DEVICE_FAMILY",                                      "1,2")
];

fn extend(s: &mut BuildSettings, table: &[(&'static str, &str)]) {
  for &(key, value) in table {
    s.insert(key, Setting::Value(value.to_string()));
  }
}

fn list(values: &[&str]) -> Setting {
  Setting::List(values.iter().map(|x| x.to_string()).collect())
}

pub fn project(profile: Profile, project: &Project) -> BuildSettings {
  let mut s = BuildSettings::new();
  extend(&mut s, PROJECT_COMMON);

  match profile {
    Profile::Debug => {
      extend(&mut s, PROJECT_DEBUG);
      s.insert("GCC_PREPROCESSOR_DEFINITIONS", list(&["DEBUG=1", "$(inherited)"]));
    },
    Profile::Release => extend(&mut s, PROJECT_RELEASE)
  }

  s.insert("IPHONEOS_DEPLOYMENT_TARGET", Setting::Value(project.deployment_target.to_string()));
  s
}

/// `info_plist` is the Info.plist path relative to the project root.
pub fn target(project: &Project, info_plist: &str) -> BuildSettings {
  let mut s = BuildSettings::new();
  extend(&mut s, TARGET_COMMON);

  s.insert("DEVELOPMENT_TEAM",          Setting::Value(project.development_team.to_string()));
  s.insert("INFOPLIST_FILE",            Setting::Value(info_plist.to_string()));
  s.insert("LD_RUNPATH_SEARCH_PATHS",   list(&["$(inherited)", "@executable_path/Frameworks"]));
  s.insert("MARKETING_VERSION",         Setting::Value(project.marketing_version.to_string()));
  s.insert("PRODUCT_BUNDLE_IDENTIFIER", Setting::Value(project.bundle_identifier.to_string()));
  s
}
