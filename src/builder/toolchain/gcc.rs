//! GCC/Clang toolchain implementation.

use std::path::{Path, PathBuf};

use super::{CommandSpec, CompileInput, LinkInput, Toolchain, ToolchainFamily};

/// GCC-style C++ driver (g++, clang++, c++).
#[derive(Debug, Clone)]
pub struct GccToolchain {
    /// Path to the C++ compiler
    pub cxx: PathBuf,
    /// Compiler family
    pub family: ToolchainFamily,
}

impl GccToolchain {
    pub fn new(cxx: PathBuf, family: ToolchainFamily) -> Self {
        GccToolchain { cxx, family }
    }
}

impl Toolchain for GccToolchain {
    fn cxx_path(&self) -> &Path {
        &self.cxx
    }

    fn compile_command(&self, input: &CompileInput) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.cxx).arg("-c").arg("-fPIC");

        for dir in &input.include_dirs {
            cmd = cmd.arg(format!("-I{}", dir.display()));
        }

        for (name, value) in &input.defines {
            match value {
                Some(v) => cmd = cmd.arg(format!("-D{}={}", name, v)),
                None => cmd = cmd.arg(format!("-D{}", name)),
            }
        }

        cmd = cmd.args(input.cxxflags.iter().cloned());

        cmd.arg(input.source.display().to_string())
            .arg("-o")
            .arg(input.output.display().to_string())
    }

    fn link_module_command(&self, input: &LinkInput) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.cxx).arg("-shared");

        // Symbols from the interpreter resolve at load time.
        if self.family == ToolchainFamily::AppleClang || cfg!(target_os = "macos") {
            cmd = cmd.args(["-undefined", "dynamic_lookup"]);
        }

        cmd = cmd.arg("-o").arg(input.output.display().to_string());

        for obj in &input.objects {
            cmd = cmd.arg(obj.display().to_string());
        }

        for dir in &input.lib_dirs {
            cmd = cmd.arg(format!("-L{}", dir.display()));
        }

        for lib in &input.libs {
            cmd = cmd.arg(format!("-l{}", lib));
        }

        cmd.args(input.ldflags.iter().cloned())
    }

    fn object_extension(&self) -> &str {
        "o"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gcc() -> GccToolchain {
        GccToolchain::new(PathBuf::from("/usr/bin/g++"), ToolchainFamily::Gcc)
    }

    #[test]
    fn test_compile_command_order() {
        let input = CompileInput {
            source: PathBuf::from("/p/torchrl/csrc/utils.cpp"),
            output: PathBuf::from("/p/build/temp/utils.o"),
            include_dirs: vec![PathBuf::from("/p")],
            defines: vec![
                ("TORCH_EXTENSION_NAME".to_string(), Some("_torchrl".to_string())),
                ("TORCH_API_INCLUDE_EXTENSION_H".to_string(), None),
            ],
            cxxflags: vec!["-O3".to_string(), "-std=c++14".to_string()],
        };

        let cmd = gcc().compile_command(&input);
        assert_eq!(cmd.program, PathBuf::from("/usr/bin/g++"));
        assert_eq!(
            cmd.args,
            vec![
                "-c",
                "-fPIC",
                "-I/p",
                "-DTORCH_EXTENSION_NAME=_torchrl",
                "-DTORCH_API_INCLUDE_EXTENSION_H",
                "-O3",
                "-std=c++14",
                "/p/torchrl/csrc/utils.cpp",
                "-o",
                "/p/build/temp/utils.o",
            ]
        );
    }

    #[test]
    fn test_link_command() {
        let input = LinkInput {
            objects: vec![PathBuf::from("a.o"), PathBuf::from("b.o")],
            output: PathBuf::from("out/_torchrl.so"),
            lib_dirs: vec![PathBuf::from("/opt/torch/lib")],
            libs: vec!["c10".to_string()],
            ldflags: vec!["-O0".to_string(), "-g".to_string()],
        };

        let cmd = gcc().link_module_command(&input);
        assert_eq!(cmd.args[0], "-shared");
        let out = cmd.args.iter().position(|a| a == "-o").unwrap();
        assert_eq!(cmd.args[out + 1], "out/_torchrl.so");
        assert!(cmd.args.contains(&"-L/opt/torch/lib".to_string()));
        assert!(cmd.args.contains(&"-lc10".to_string()));
        assert_eq!(&cmd.args[cmd.args.len() - 2..], &["-O0", "-g"]);
    }
}
