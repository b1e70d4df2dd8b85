use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TargetError {
    #[error("unsupported architecture `{0}` (expected aarch64 or x86_64)")]
    UnsupportedArch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Aarch64,
    X86_64,
}

impl Arch {
    fn parse(name: &str) -> Result<Self, TargetError> {
        match name {
            "aarch64" | "arm64" => Ok(Arch::Aarch64),
            "x86_64" | "amd64" | "x86-64" => Ok(Arch::X86_64),
            other => Err(TargetError::UnsupportedArch(other.to_owned())),
        }
    }
}

impl Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arch::Aarch64 => write!(f, "aarch64"),
            Arch::X86_64 => write!(f, "x86_64"),
        }
    }
}

/// Object format family, which decides symbol naming and relocation syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Mach-O: global symbols carry a leading underscore.
    Apple,
    Elf,
}

/// Fixed facts about one target, chosen once before translation starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetProfile {
    pub arch: Arch,
    pub platform: Platform,
    /// Callee-saved register holding the address of the current cell.
    pub cursor_register: &'static str,
    /// Largest count a single add/sub immediate may carry.
    pub immediate_max: u32,
    /// Size of the zeroed backing array in bytes.
    pub memory_size: u64,
    pub symbol_prefix: &'static str,
}

impl TargetProfile {
    pub const fn new(arch: Arch, platform: Platform) -> Self {
        let symbol_prefix = match platform {
            Platform::Apple => "_",
            Platform::Elf => "",
        };

        match arch {
            Arch::Aarch64 => Self {
                arch,
                platform,
                cursor_register: "x19",
                // 12-bit unsigned immediate of add/sub
                immediate_max: 4095,
                memory_size: 65_536,
                symbol_prefix,
            },
            Arch::X86_64 => Self {
                arch,
                platform,
                cursor_register: "r12",
                // sign-extended 32-bit immediate
                immediate_max: i32::MAX as u32,
                memory_size: 64 * 1024 * 1024,
                symbol_prefix,
            },
        }
    }

    /// Profile of the machine this binary was built for.
    pub fn host() -> Result<Self, TargetError> {
        let arch = Arch::parse(std::env::consts::ARCH)?;
        let platform = if cfg!(target_vendor = "apple") {
            Platform::Apple
        } else {
            Platform::Elf
        };

        Ok(Self::new(arch, platform))
    }

    /// Parses a target triple such as `aarch64-apple-darwin` or
    /// `x86_64-unknown-linux-gnu`.
    pub fn from_triple(triple: &str) -> Result<Self, TargetError> {
        let mut components = triple.split('-');
        let arch = Arch::parse(components.next().unwrap_or_default())?;

        let platform = if components.any(|c| {
            c == "apple" || c.starts_with("darwin") || c.starts_with("macos") || c == "ios"
        }) {
            Platform::Apple
        } else {
            Platform::Elf
        };

        Ok(Self::new(arch, platform))
    }

    pub fn symbol(&self, name: &str) -> String {
        format!("{}{}", self.symbol_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test {
        ($name:ident, $triple:expr => $arch:expr, $platform:expr) => {
            #[test]
            fn $name() {
                let profile = TargetProfile::from_triple($triple).expect("failed to resolve");

                assert_eq!((profile.arch, profile.platform), ($arch, $platform))
            }
        };
    }

    test!(triple_linux_x86_64, "x86_64-unknown-linux-gnu" => Arch::X86_64, Platform::Elf);
    test!(triple_linux_aarch64, "aarch64-unknown-linux-gnu" => Arch::Aarch64, Platform::Elf);
    test!(triple_macos_arm, "aarch64-apple-darwin" => Arch::Aarch64, Platform::Apple);
    test!(triple_macos_intel, "x86_64-apple-darwin" => Arch::X86_64, Platform::Apple);
    test!(triple_arm64_alias, "arm64-apple-macosx14.0.0" => Arch::Aarch64, Platform::Apple);
    test!(triple_bare_arch, "x86_64" => Arch::X86_64, Platform::Elf);

    #[test]
    fn unsupported_arch() {
        assert_eq!(
            TargetProfile::from_triple("riscv64gc-unknown-linux-gnu"),
            Err(TargetError::UnsupportedArch("riscv64gc".to_owned()))
        );
        assert!(TargetProfile::from_triple("").is_err());
    }

    #[test]
    fn symbols_follow_platform() {
        let apple = TargetProfile::new(Arch::Aarch64, Platform::Apple);
        let elf = TargetProfile::new(Arch::Aarch64, Platform::Elf);

        assert_eq!(apple.symbol("main"), "_main");
        assert_eq!(elf.symbol("main"), "main");
    }

    #[test]
    fn immediate_limits() {
        let arm = TargetProfile::new(Arch::Aarch64, Platform::Elf);
        let x86 = TargetProfile::new(Arch::X86_64, Platform::Elf);

        assert_eq!(arm.immediate_max, 4095);
        assert_eq!(x86.immediate_max, 2_147_483_647);
        assert!(arm.memory_size >= 65_536 && x86.memory_size >= 65_536);
    }

    #[test]
    fn host_is_stable() {
        if let Ok(profile) = TargetProfile::host() {
            assert_eq!(TargetProfile::host(), Ok(profile));
        }
    }
}
