/// Shader compilation and program linking against a driver backend
use std::fmt::{self, Display, Formatter};
use std::path::Path;

use crate::error::{LoaderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// The graphics driver's side of shader handling.
///
/// Failures carry the driver's info log. A backend that fails `compile` must
/// release whatever it allocated for that shader itself.
pub trait ShaderBackend {
    type Shader;
    type Program;

    fn compile(&mut self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    fn link(
        &mut self,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> Result<Self::Program, String>;

    /// Release a shader object. Called once a program has been linked from
    /// it, or when its sibling stage failed.
    fn delete_shader(&mut self, shader: Self::Shader);
}

/// Compile one stage; `origin` names the source in diagnostics
pub fn compile_shader<B: ShaderBackend>(
    backend: &mut B,
    stage: ShaderStage,
    source: &str,
    origin: &str,
) -> Result<B::Shader> {
    match backend.compile(stage, source) {
        Ok(shader) => {
            tracing::debug!(%stage, origin, "compiled shader");
            Ok(shader)
        }
        Err(log) => {
            tracing::error!(%stage, origin, log = %log, "shader compile error");
            Err(LoaderError::Compile {
                stage,
                origin: origin.to_string(),
                log,
            })
        }
    }
}

/// Read a shader source file and compile it
pub fn load_shader_file<B: ShaderBackend>(
    backend: &mut B,
    path: impl AsRef<Path>,
    stage: ShaderStage,
) -> Result<B::Shader> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| {
        tracing::error!(path = %path.display(), "could not open shader for reading");
        LoaderError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    compile_shader(backend, stage, &source, &path.display().to_string())
}

/// Build a program from in-memory vertex and fragment sources
pub fn program_from_sources<B: ShaderBackend>(
    backend: &mut B,
    vertex: &str,
    fragment: &str,
) -> Result<B::Program> {
    let vs = compile_shader(backend, ShaderStage::Vertex, vertex, "<vertex source>")?;
    let fs = match compile_shader(backend, ShaderStage::Fragment, fragment, "<fragment source>") {
        Ok(fs) => fs,
        Err(e) => {
            backend.delete_shader(vs);
            return Err(e);
        }
    };
    link_program(backend, vs, fs)
}

/// Build a program from vertex and fragment source files
pub fn load_program<B: ShaderBackend>(
    backend: &mut B,
    vertex: impl AsRef<Path>,
    fragment: impl AsRef<Path>,
) -> Result<B::Program> {
    let vs = load_shader_file(backend, vertex, ShaderStage::Vertex)?;
    let fs = match load_shader_file(backend, fragment, ShaderStage::Fragment) {
        Ok(fs) => fs,
        Err(e) => {
            backend.delete_shader(vs);
            return Err(e);
        }
    };
    link_program(backend, vs, fs)
}

fn link_program<B: ShaderBackend>(
    backend: &mut B,
    vs: B::Shader,
    fs: B::Shader,
) -> Result<B::Program> {
    let linked = backend.link(&vs, &fs);
    // the program keeps what it needs; the stage objects are done either way
    backend.delete_shader(vs);
    backend.delete_shader(fs);

    match linked {
        Ok(program) => {
            tracing::debug!("linked shader program");
            Ok(program)
        }
        Err(log) => {
            tracing::error!(log = %log, "program link error");
            Err(LoaderError::Link { log })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// Accepts anything with a `main(` unless it carries a `// missing` marker
    #[derive(Default)]
    struct MockBackend {
        next_id: u32,
        live: Vec<u32>,
        fail_link: bool,
        linked: Vec<(u32, u32)>,
    }

    impl ShaderBackend for MockBackend {
        type Shader = u32;
        type Program = u32;

        fn compile(&mut self, stage: ShaderStage, source: &str) -> Result<u32, String> {
            if !source.contains("main(") || source.contains("// missing") {
                return Err(format!("0:1: {stage} syntax error"));
            }
            self.next_id += 1;
            self.live.push(self.next_id);
            Ok(self.next_id)
        }

        fn link(&mut self, vertex: &u32, fragment: &u32) -> Result<u32, String> {
            if self.fail_link {
                return Err("error: varying frag_uv not written".to_string());
            }
            self.linked.push((*vertex, *fragment));
            Ok(100 + self.linked.len() as u32)
        }

        fn delete_shader(&mut self, shader: u32) {
            self.live.retain(|id| *id != shader);
        }
    }

    #[test]
    fn test_load_program_from_files() {
        let mut backend = MockBackend::default();
        let program =
            load_program(&mut backend, fixture("basic.vert"), fixture("basic.frag")).unwrap();
        assert_eq!(program, 101);
        assert_eq!(backend.linked, vec![(1, 2)]);
        assert!(backend.live.is_empty());
    }

    #[test]
    fn test_compile_failure_reports_log() {
        let mut backend = MockBackend::default();
        let err =
            load_program(&mut backend, fixture("basic.vert"), fixture("broken.frag")).unwrap_err();
        match err {
            LoaderError::Compile { stage, origin, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(origin.ends_with("broken.frag"));
                assert!(log.contains("syntax error"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // the vertex stage that did compile is released
        assert!(backend.live.is_empty());
        assert!(backend.linked.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let mut backend = MockBackend::default();
        let err = load_program(&mut backend, fixture("nope.vert"), fixture("basic.frag"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
        assert_eq!(backend.next_id, 0);
    }

    #[test]
    fn test_link_failure() {
        let mut backend = MockBackend {
            fail_link: true,
            ..Default::default()
        };
        let err = program_from_sources(&mut backend, "void main() {}", "void main() {}")
            .unwrap_err();
        assert!(matches!(err, LoaderError::Link { ref log } if log.contains("frag_uv")));
        assert!(backend.live.is_empty());
    }

    #[test]
    fn test_error_messages() {
        let mut backend = MockBackend::default();
        let err = program_from_sources(&mut backend, "garbage", "void main() {}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "vertex shader <vertex source> failed to compile: 0:1: vertex syntax error"
        );
    }
}
