use std::fmt;
use std::num::NonZeroU32;

use glow::HasContext;

/// One compilation unit of a program: vertex or fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Component type of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Float,
    Short,
    UnsignedByte,
}

impl AttributeKind {
    fn gl_type(self) -> u32 {
        match self {
            AttributeKind::Float => glow::FLOAT,
            AttributeKind::Short => glow::SHORT,
            AttributeKind::UnsignedByte => glow::UNSIGNED_BYTE,
        }
    }
}

/// The slice of the GL driver that shader programs touch.
///
/// Stage and program handles are raw GL object names; `0` is never a valid
/// handle. Creation can be refused by the driver, everything else is
/// fire-and-forget at this boundary. All calls must happen on the thread
/// that owns the current context.
pub trait GlDriver {
    fn create_stage(&self, stage: Stage) -> Result<u32, String>;
    fn stage_source(&self, handle: u32, source: &str);
    fn compile_stage(&self, handle: u32);
    fn stage_compiled(&self, handle: u32) -> bool;
    fn stage_log(&self, handle: u32) -> String;
    fn delete_stage(&self, handle: u32);

    fn create_program(&self) -> Result<u32, String>;
    fn attach_stage(&self, program: u32, handle: u32);
    fn detach_stage(&self, program: u32, handle: u32);
    fn link_program(&self, program: u32);
    fn program_linked(&self, program: u32) -> bool;
    fn program_log(&self, program: u32) -> String;
    fn delete_program(&self, program: u32);

    /// `None` when the linked program does not declare the attribute.
    fn attrib_location(&self, program: u32, name: &str) -> Option<u32>;

    fn enable_attrib_array(&self, location: u32);
    fn attrib_pointer(
        &self,
        location: u32,
        components: i32,
        kind: AttributeKind,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
}

fn shader_handle(handle: u32) -> glow::NativeShader {
    glow::NativeShader(NonZeroU32::new(handle).unwrap())
}

fn program_handle(handle: u32) -> glow::NativeProgram {
    glow::NativeProgram(NonZeroU32::new(handle).unwrap())
}

impl GlDriver for glow::Context {
    fn create_stage(&self, stage: Stage) -> Result<u32, String> {
        let kind = match stage {
            Stage::Vertex => glow::VERTEX_SHADER,
            Stage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { HasContext::create_shader(self, kind).map(|s| s.0.get()) }
    }

    fn stage_source(&self, handle: u32, source: &str) {
        unsafe { HasContext::shader_source(self, shader_handle(handle), source) }
    }

    fn compile_stage(&self, handle: u32) {
        unsafe { HasContext::compile_shader(self, shader_handle(handle)) }
    }

    fn stage_compiled(&self, handle: u32) -> bool {
        unsafe { HasContext::get_shader_compile_status(self, shader_handle(handle)) }
    }

    fn stage_log(&self, handle: u32) -> String {
        unsafe { HasContext::get_shader_info_log(self, shader_handle(handle)) }
    }

    fn delete_stage(&self, handle: u32) {
        unsafe { HasContext::delete_shader(self, shader_handle(handle)) }
    }

    fn create_program(&self) -> Result<u32, String> {
        unsafe { HasContext::create_program(self).map(|p| p.0.get()) }
    }

    fn attach_stage(&self, program: u32, handle: u32) {
        unsafe { HasContext::attach_shader(self, program_handle(program), shader_handle(handle)) }
    }

    fn detach_stage(&self, program: u32, handle: u32) {
        unsafe { HasContext::detach_shader(self, program_handle(program), shader_handle(handle)) }
    }

    fn link_program(&self, program: u32) {
        unsafe { HasContext::link_program(self, program_handle(program)) }
    }

    fn program_linked(&self, program: u32) -> bool {
        unsafe { HasContext::get_program_link_status(self, program_handle(program)) }
    }

    fn program_log(&self, program: u32) -> String {
        unsafe { HasContext::get_program_info_log(self, program_handle(program)) }
    }

    fn delete_program(&self, program: u32) {
        unsafe { HasContext::delete_program(self, program_handle(program)) }
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        unsafe { HasContext::get_attrib_location(self, program_handle(program), name) }
    }

    fn enable_attrib_array(&self, location: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, location) }
    }

    fn attrib_pointer(
        &self,
        location: u32,
        components: i32,
        kind: AttributeKind,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                location,
                components,
                kind.gl_type(),
                normalized,
                stride,
                offset,
            )
        }
    }
}
