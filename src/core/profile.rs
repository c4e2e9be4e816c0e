//! Build modes and the compiler/linker flags they select.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable that switches the extension into debug mode.
pub const DEBUG_ENV: &str = "DEBUG";

/// C++ standard the extension is compiled against.
pub const CXX_STD_FLAG: &str = "-std=c++14";

const COLOR_FLAG: &str = "-fdiagnostics-color=always";

/// Optimization mode of an extension build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Release,
    Debug,
}

impl BuildMode {
    /// Interpret the value of the `DEBUG` environment variable.
    ///
    /// Only the exact string `"1"` selects debug mode. Anything else,
    /// including an unset variable, means release.
    pub fn from_debug_var(value: Option<&str>) -> Self {
        match value {
            Some("1") => BuildMode::Debug,
            _ => BuildMode::Release,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Release => "release",
            BuildMode::Debug => "debug",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved compiler and linker flags for one build mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildProfile {
    pub mode: BuildMode,
    pub compile_flags: Vec<String>,
    pub link_flags: Vec<String>,
}

impl BuildProfile {
    /// Select the flag set for `mode`.
    pub fn for_mode(mode: BuildMode) -> Self {
        let (compile_flags, link_flags): (&[&str], &[&str]) = match mode {
            BuildMode::Release => (&["-O3", CXX_STD_FLAG, COLOR_FLAG], &[]),
            BuildMode::Debug => (
                &["-O0", "-fno-inline", "-g", CXX_STD_FLAG, COLOR_FLAG],
                &["-O0", "-g"],
            ),
        };

        BuildProfile {
            mode,
            compile_flags: compile_flags.iter().map(|s| s.to_string()).collect(),
            link_flags: link_flags.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_optimization(flag: &str) -> bool {
        flag.starts_with("-O") && flag != "-O0"
    }

    #[test]
    fn test_non_one_values_select_release() {
        for value in [None, Some("0"), Some(""), Some("true"), Some("yes"), Some(" 1"), Some("01")] {
            let profile = BuildProfile::for_mode(BuildMode::from_debug_var(value));
            assert_eq!(profile, BuildProfile::for_mode(BuildMode::Release), "DEBUG={:?}", value);
        }
    }

    #[test]
    fn test_debug_profile_has_symbols_and_no_optimization() {
        let profile = BuildProfile::for_mode(BuildMode::from_debug_var(Some("1")));
        assert_eq!(profile.mode, BuildMode::Debug);

        for flags in [&profile.compile_flags, &profile.link_flags] {
            assert!(flags.iter().any(|f| f == "-g"));
            assert!(flags.iter().any(|f| f == "-O0"));
            assert!(!flags.iter().any(|f| is_optimization(f)));
        }
        assert!(profile.compile_flags.iter().any(|f| f == "-fno-inline"));
    }

    #[test]
    fn test_release_profile_flags() {
        let profile = BuildProfile::for_mode(BuildMode::Release);
        assert_eq!(
            profile.compile_flags,
            vec!["-O3", "-std=c++14", "-fdiagnostics-color=always"]
        );
        assert!(profile.link_flags.is_empty());
    }
}
