use std::rc::Rc;

use log::debug;

use crate::driver::{AttributeKind, GlDriver, Stage};
use crate::error::ShaderError;

/// Attribute name every program is probed for after linking.
pub const POSITION_ATTRIBUTE: &str = "a_pos";

/// A compiled and linked GPU shader program.
///
/// Construction compiles both stages and links them; it either yields a
/// usable program or an error, never anything in between. Dropping the value
/// releases the program object and both stage objects on the context.
///
/// Holding the driver behind `Rc` keeps the type `!Send`: every call,
/// including the implicit ones in `Drop`, has to happen on the thread that
/// owns the context.
#[derive(Debug)]
pub struct ShaderProgram<G: GlDriver> {
    gl: Rc<G>,
    name: &'static str,
    program: u32,
    vert_stage: u32,
    frag_stage: u32,
    a_pos: Option<u32>,
}

/// One vertex attribute of a concrete shader's vertex record.
///
/// `field_offset` is the attribute's offset inside the record; the offset
/// of the record itself inside the bound buffer is supplied per bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub components: i32,
    pub kind: AttributeKind,
    pub normalized: bool,
    pub stride: i32,
    pub field_offset: i32,
}

/// The capability every concrete shader supplies: describe the program's
/// vertex layout to the context right before a draw.
pub trait Shader<G: GlDriver> {
    fn program(&self) -> &ShaderProgram<G>;

    /// Configure all vertex attribute arrays this program reads, given the
    /// byte offset of its vertex data inside the currently bound buffer.
    ///
    /// The attribute-array state is global to the context and overwritten
    /// by the next `bind` from any shader, so call this immediately before
    /// issuing the corresponding draw.
    fn bind(&self, offset: i32);
}

impl<G: GlDriver> ShaderProgram<G> {
    /// Compile `vertex_source` and `fragment_source` and link them into a
    /// program on `gl`.
    ///
    /// `name` is only used in diagnostics and is expected to outlive the
    /// program (typically a constant). Any compile or link failure aborts
    /// construction; whatever stage or program objects were created up to
    /// that point are released before the error is returned.
    pub fn new(
        gl: Rc<G>,
        name: &'static str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let mut this = Self {
            gl,
            name,
            program: 0,
            vert_stage: 0,
            frag_stage: 0,
            a_pos: None,
        };

        // Each `?` drops `this`, which releases the handles acquired so far.
        this.vert_stage = compile_stage(this.gl.as_ref(), name, Stage::Vertex, vertex_source)?;
        this.frag_stage = compile_stage(this.gl.as_ref(), name, Stage::Fragment, fragment_source)?;
        this.program = link_program(this.gl.as_ref(), name, this.vert_stage, this.frag_stage)?;

        // Not every program declares a position attribute; `None` is fine.
        this.a_pos = this.gl.attrib_location(this.program, POSITION_ATTRIBUTE);

        debug!(
            "linked shader program `{}` (id {}, a_pos {:?})",
            name, this.program, this.a_pos
        );
        Ok(this)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The linked program's GL object name. Never 0 for a live value.
    pub fn id(&self) -> u32 {
        self.program
    }

    /// Location of the `a_pos` attribute, resolved at link time.
    pub fn position_attribute(&self) -> Option<u32> {
        self.a_pos
    }

    /// Resolve any further attribute a concrete shader declares.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.gl.attrib_location(self.program, name)
    }

    /// Enable and describe one attribute array, placing it at
    /// `base_offset + attr.field_offset` in the bound buffer.
    ///
    /// A `None` location (attribute absent from the linked program) is
    /// skipped without touching context state.
    pub fn set_attribute(&self, location: Option<u32>, attr: VertexAttribute, base_offset: i32) {
        let Some(location) = location else {
            return;
        };
        self.gl.enable_attrib_array(location);
        self.gl.attrib_pointer(
            location,
            attr.components,
            attr.kind,
            attr.normalized,
            attr.stride,
            base_offset + attr.field_offset,
        );
    }
}

impl<G: GlDriver> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        // Sole release path, shared by failed construction and normal
        // teardown. Zeroing after each delete keeps it single-shot.
        if self.program != 0 {
            self.gl.delete_program(self.program);
            self.program = 0;
        }
        if self.vert_stage != 0 {
            self.gl.delete_stage(self.vert_stage);
            self.vert_stage = 0;
        }
        if self.frag_stage != 0 {
            self.gl.delete_stage(self.frag_stage);
            self.frag_stage = 0;
        }
    }
}

fn compile_stage<G: GlDriver>(
    gl: &G,
    name: &'static str,
    stage: Stage,
    source: &str,
) -> Result<u32, ShaderError> {
    let handle = gl
        .create_stage(stage)
        .map_err(|log| ShaderError::Compile { stage, name, log })?;

    gl.stage_source(handle, source);
    gl.compile_stage(handle);

    if !gl.stage_compiled(handle) {
        let log = gl.stage_log(handle);
        gl.delete_stage(handle);
        return Err(ShaderError::Compile { stage, name, log });
    }

    Ok(handle)
}

fn link_program<G: GlDriver>(
    gl: &G,
    name: &'static str,
    vert_stage: u32,
    frag_stage: u32,
) -> Result<u32, ShaderError> {
    let program = gl
        .create_program()
        .map_err(|log| ShaderError::Link { name, log })?;

    gl.attach_stage(program, vert_stage);
    gl.attach_stage(program, frag_stage);
    gl.link_program(program);

    if !gl.program_linked(program) {
        let log = gl.program_log(program);
        gl.delete_program(program);
        return Err(ShaderError::Link { name, log });
    }

    // Linking copied what it needs; the stage objects stay attached to
    // nothing and are deleted with the program's owner.
    gl.detach_stage(program, vert_stage);
    gl.detach_stage(program, frag_stage);

    Ok(program)
}
