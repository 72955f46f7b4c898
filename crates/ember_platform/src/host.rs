//! Host context: OS family and Linux distribution identity.
//!
//! Source discovery needs exactly one host-dependent fact: whether the host
//! platform supplies its own program entry point, in which case entry-point
//! sources in the core package must be excluded to avoid a duplicate-symbol
//! link failure. That rule is currently scoped to the Red Hat and SUSE
//! distribution families; it is deliberately not generalized to other hosts.

/// The host operating-system family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsFamily {
    /// Linux (distribution carried separately).
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
    /// Any other Unix-like system.
    OtherUnix,
}

/// A Linux distribution family, classified from `/etc/os-release`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinuxDistro {
    /// Red Hat family (RHEL, Fedora, CentOS, ...).
    RedHat,
    /// SUSE family (openSUSE, SLES, ...).
    Suse,
    /// Any other distribution, carrying its `ID` value.
    Other(String),
}

/// The host platform a generation run executes on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostContext {
    family: OsFamily,
    distro: Option<LinuxDistro>,
}

impl HostContext {
    /// Detects the current host.
    ///
    /// On Linux the distribution is classified from `/etc/os-release`; a
    /// missing or unreadable file leaves the distribution unknown, which
    /// disables the entry-point exclusion.
    pub fn detect() -> Self {
        if cfg!(target_os = "linux") {
            let distro = std::fs::read_to_string("/etc/os-release")
                .ok()
                .and_then(|content| parse_os_release(&content));
            Self {
                family: OsFamily::Linux,
                distro,
            }
        } else if cfg!(target_os = "macos") {
            Self::of(OsFamily::MacOs)
        } else if cfg!(windows) {
            Self::of(OsFamily::Windows)
        } else {
            Self::of(OsFamily::OtherUnix)
        }
    }

    /// Creates a non-Linux host context.
    pub fn of(family: OsFamily) -> Self {
        Self {
            family,
            distro: None,
        }
    }

    /// Creates a Linux host context with a known distribution.
    pub fn linux(distro: LinuxDistro) -> Self {
        Self {
            family: OsFamily::Linux,
            distro: Some(distro),
        }
    }

    /// Returns the OS family.
    pub fn family(&self) -> OsFamily {
        self.family
    }

    /// Returns the Linux distribution, if known.
    pub fn distro(&self) -> Option<&LinuxDistro> {
        self.distro.as_ref()
    }

    /// Returns whether this host supplies its own program entry point.
    ///
    /// True only for the Red Hat and SUSE Linux families. Core-package
    /// sources matching the entry-point naming pattern are excluded on
    /// these hosts.
    pub fn supplies_entry_point(&self) -> bool {
        self.family == OsFamily::Linux
            && matches!(self.distro, Some(LinuxDistro::RedHat) | Some(LinuxDistro::Suse))
    }
}

/// Classifies a distribution from `os-release` content.
///
/// Looks at `ID` first, then `ID_LIKE`, matching the Red Hat and SUSE
/// families by their well-known identifiers.
fn parse_os_release(content: &str) -> Option<LinuxDistro> {
    let id = os_release_field(content, "ID")?;
    let id_like = os_release_field(content, "ID_LIKE").unwrap_or_default();

    let mut candidates = vec![id.as_str()];
    candidates.extend(id_like.split_whitespace());

    for candidate in &candidates {
        match *candidate {
            "rhel" | "fedora" | "centos" | "rocky" | "almalinux" => {
                return Some(LinuxDistro::RedHat)
            }
            "suse" | "opensuse" | "sles" | "opensuse-leap" | "opensuse-tumbleweed" => {
                return Some(LinuxDistro::Suse)
            }
            _ => {}
        }
    }
    Some(LinuxDistro::Other(id))
}

/// Extracts a field value from `os-release` content, stripping quotes.
fn os_release_field(content: &str, field: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.strip_prefix(field)?.strip_prefix('=')?;
        Some(value.trim().trim_matches('"').to_string())
    })
}
