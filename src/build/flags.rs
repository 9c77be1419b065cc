use std::collections::BTreeMap;

/// Flags forwarded to `go build` inside the build image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFlags {
    /// Print the names of packages as they are compiled
    pub verbose: bool,
    /// Print the commands as the build executes them
    pub steps: bool,
    /// Enable data race detection (amd64 only)
    pub race: bool,
    /// Build tags to consider satisfied
    pub tags: String,
    /// Arguments passed on each go tool link invocation
    pub ld_flags: String,
    /// Kind of object file to build
    pub mode: String,
    /// Version control stamping mode
    pub vcs: String,
    /// Remove file system paths from the resulting executable
    pub trim_path: bool,
}

impl Default for BuildFlags {
    fn default() -> Self {
        Self {
            verbose: false,
            steps: false,
            race: false,
            tags: String::new(),
            ld_flags: String::new(),
            mode: "default".to_string(),
            vcs: String::new(),
            trim_path: false,
        }
    }
}

impl BuildFlags {
    /// Environment values understood by the build script, one per flag
    pub fn env(&self) -> BTreeMap<String, String> {
        [
            ("FLAG_V", self.verbose.to_string()),
            ("FLAG_X", self.steps.to_string()),
            ("FLAG_RACE", self.race.to_string()),
            ("FLAG_TAGS", self.tags.clone()),
            ("FLAG_LDFLAGS", self.ld_flags.clone()),
            ("FLAG_BUILDMODE", self.mode.clone()),
            ("FLAG_BUILDVCS", self.vcs.clone()),
            ("FLAG_TRIMPATH", self.trim_path.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_renders_every_flag() {
        let flags = BuildFlags {
            race: true,
            tags: "netgo osusergo".to_string(),
            ..BuildFlags::default()
        };
        let env = flags.env();

        assert_eq!(env.len(), 8);
        assert_eq!(env["FLAG_V"], "false");
        assert_eq!(env["FLAG_RACE"], "true");
        assert_eq!(env["FLAG_TAGS"], "netgo osusergo");
        assert_eq!(env["FLAG_BUILDMODE"], "default");
        assert_eq!(env["FLAG_BUILDVCS"], "");
    }
}
