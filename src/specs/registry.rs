use crate::foundation::core::NodeType;

/// Every node type the engine knows, sorted by name (byte order).
pub const BUILTIN_NODE_TYPES: &[(&str, [u8; 4])] = &[
    ("AnimKeyFrameBuffer", *b"AKFB"),
    ("AnimKeyFrameColor", *b"AKFc"),
    ("AnimKeyFrameFloat", *b"AKF1"),
    ("AnimKeyFrameQuat", *b"AKFQ"),
    ("AnimKeyFrameVec2", *b"AKF2"),
    ("AnimKeyFrameVec3", *b"AKF3"),
    ("AnimKeyFrameVec4", *b"AKF4"),
    ("AnimatedBufferFloat", *b"ABf1"),
    ("AnimatedBufferVec2", *b"ABf2"),
    ("AnimatedBufferVec3", *b"ABf3"),
    ("AnimatedBufferVec4", *b"ABf4"),
    ("AnimatedColor", *b"Anmc"),
    ("AnimatedFloat", *b"Anm1"),
    ("AnimatedPath", *b"AnmP"),
    ("AnimatedQuat", *b"AnmQ"),
    ("AnimatedTime", *b"AnmT"),
    ("AnimatedVec2", *b"Anm2"),
    ("AnimatedVec3", *b"Anm3"),
    ("AnimatedVec4", *b"Anm4"),
    ("Block", *b"Blck"),
    ("BufferBVec2", *b"Bsb2"),
    ("BufferBVec3", *b"Bsb3"),
    ("BufferBVec4", *b"Bsb4"),
    ("BufferByte", *b"Bsb1"),
    ("BufferFloat", *b"Bfv1"),
    ("BufferIVec2", *b"Bsi2"),
    ("BufferIVec3", *b"Bsi3"),
    ("BufferIVec4", *b"Bsi4"),
    ("BufferInt", *b"Bsi1"),
    ("BufferInt64", *b"Bsl1"),
    ("BufferMat4", *b"Bfm4"),
    ("BufferSVec2", *b"Bss2"),
    ("BufferSVec3", *b"Bss3"),
    ("BufferSVec4", *b"Bss4"),
    ("BufferShort", *b"Bss1"),
    ("BufferUBVec2", *b"Bub2"),
    ("BufferUBVec3", *b"Bub3"),
    ("BufferUBVec4", *b"Bub4"),
    ("BufferUByte", *b"Bub1"),
    ("BufferUIVec2", *b"Bui2"),
    ("BufferUIVec3", *b"Bui3"),
    ("BufferUIVec4", *b"Bui4"),
    ("BufferUInt", *b"Bui1"),
    ("BufferUSVec2", *b"Bus2"),
    ("BufferUSVec3", *b"Bus3"),
    ("BufferUSVec4", *b"Bus4"),
    ("BufferUShort", *b"Bus1"),
    ("BufferVec2", *b"Bfv2"),
    ("BufferVec3", *b"Bfv3"),
    ("BufferVec4", *b"Bfv4"),
    ("Camera", *b"Cmra"),
    ("Circle", *b"Crcl"),
    ("ColorKey", *b"CKey"),
    ("ColorStats", *b"ClrS"),
    ("Compute", *b"Cpt "),
    ("ComputeProgram", *b"CptP"),
    ("Draw", *b"Draw"),
    ("DrawColor", *b"Dclr"),
    ("DrawDisplace", *b"Ddsp"),
    ("DrawGradient", *b"Dgrd"),
    ("DrawGradient4", *b"Dgd4"),
    ("DrawHistogram", *b"Dhst"),
    ("DrawMask", *b"Dmsk"),
    ("DrawNoise", *b"DNoi"),
    ("DrawPath", *b"DPth"),
    ("DrawTexture", *b"Dtex"),
    ("DrawWaveform", *b"Dwfm"),
    ("EvalFloat", *b"Evf1"),
    ("EvalVec2", *b"Evf2"),
    ("EvalVec3", *b"Evf3"),
    ("EvalVec4", *b"Evf4"),
    ("FastGaussianBlur", *b"FGBl"),
    ("FilterAlpha", *b"Falf"),
    ("FilterColorMap", *b"Fmap"),
    ("FilterContrast", *b"Fctr"),
    ("FilterExposure", *b"Fexp"),
    ("FilterInverseAlpha", *b"F1-a"),
    ("FilterLinear2sRGB", *b"Frgb"),
    ("FilterOpacity", *b"Fopa"),
    ("FilterPremult", *b"Fpre"),
    ("FilterSRGB2Linear", *b"Flin"),
    ("FilterSaturation", *b"Fsat"),
    ("FilterSelector", *b"FSel"),
    ("FontFace", *b"Font"),
    ("GaussianBlur", *b"GBlr"),
    ("Geometry", *b"Geom"),
    ("GraphicConfig", *b"GrCf"),
    ("GridLayout", *b"GrdL"),
    ("Group", *b"Grp "),
    ("HexagonalBlur", *b"HGBl"),
    ("IOBool", *b"IOb1"),
    ("IOFloat", *b"IOf1"),
    ("IOIVec2", *b"IOi2"),
    ("IOIVec3", *b"IOi3"),
    ("IOIVec4", *b"IOi4"),
    ("IOInt", *b"IOi1"),
    ("IOMat3", *b"IOm3"),
    ("IOMat4", *b"IOm4"),
    ("IOUInt", *b"IOu1"),
    ("IOUIvec2", *b"IOu2"),
    ("IOUIvec3", *b"IOu3"),
    ("IOUIvec4", *b"IOu4"),
    ("IOVec2", *b"IOf2"),
    ("IOVec3", *b"IOf3"),
    ("IOVec4", *b"IOf4"),
    ("Identity", *b"Id  "),
    ("Media", *b"Mdia"),
    ("NoiseFloat", *b"Nzf1"),
    ("NoiseVec2", *b"Nzf2"),
    ("NoiseVec3", *b"Nzf3"),
    ("NoiseVec4", *b"Nzf4"),
    ("Path", *b"Path"),
    ("PathKeyBezier2", *b"PhK2"),
    ("PathKeyBezier3", *b"PhK3"),
    ("PathKeyClose", *b"PhCl"),
    ("PathKeyLine", *b"PhK1"),
    ("PathKeyMove", *b"PhK0"),
    ("Program", *b"Prgm"),
    ("Quad", *b"Quad"),
    ("RenderToTexture", *b"RTT "),
    ("ResourceProps", *b"ResP"),
    ("Rotate", *b"TRot"),
    ("RotateQuat", *b"TRoQ"),
    ("Scale", *b"Tscl"),
    ("Skew", *b"Tskw"),
    ("SmoothPath", *b"SPth"),
    ("StreamedBufferFloat", *b"SBf1"),
    ("StreamedBufferIVec2", *b"SBi2"),
    ("StreamedBufferIVec3", *b"SBi3"),
    ("StreamedBufferIVec4", *b"SBi4"),
    ("StreamedBufferInt", *b"SBi1"),
    ("StreamedBufferMat4", *b"SBm4"),
    ("StreamedBufferUIVec2", *b"SBu2"),
    ("StreamedBufferUIVec3", *b"SBu3"),
    ("StreamedBufferUIVec4", *b"SBu4"),
    ("StreamedBufferUInt", *b"SBu1"),
    ("StreamedBufferVec2", *b"SBf2"),
    ("StreamedBufferVec3", *b"SBf3"),
    ("StreamedBufferVec4", *b"SBf4"),
    ("StreamedFloat", *b"Stf1"),
    ("StreamedIVec2", *b"Sti2"),
    ("StreamedIVec3", *b"Sti3"),
    ("StreamedIVec4", *b"Sti4"),
    ("StreamedInt", *b"Sti1"),
    ("StreamedMat4", *b"Stm4"),
    ("StreamedUIVec2", *b"Stu2"),
    ("StreamedUIVec3", *b"Stu3"),
    ("StreamedUIVec4", *b"Stu4"),
    ("StreamedUInt", *b"Stu1"),
    ("StreamedVec2", *b"Stf2"),
    ("StreamedVec3", *b"Stf3"),
    ("StreamedVec4", *b"Stf4"),
    ("Text", *b"Text"),
    ("TextEffect", *b"TxFX"),
    ("Texture2D", *b"Tex2"),
    ("Texture2DArray", *b"Te2A"),
    ("Texture3D", *b"Tex3"),
    ("TextureCube", *b"TexC"),
    ("TextureView", *b"TexV"),
    ("Time", *b"Time"),
    ("TimeRangeFilter", *b"TRFl"),
    ("Transform", *b"Trfm"),
    ("Translate", *b"Tmov"),
    ("Triangle", *b"Trgl"),
    ("UniformBool", *b"Unb1"),
    ("UniformColor", *b"Unc3"),
    ("UniformFloat", *b"Unf1"),
    ("UniformIVec2", *b"Uni2"),
    ("UniformIVec3", *b"Uni3"),
    ("UniformIVec4", *b"Uni4"),
    ("UniformInt", *b"Uni1"),
    ("UniformMat4", *b"UnM4"),
    ("UniformQuat", *b"UnQt"),
    ("UniformUIVec2", *b"Unu2"),
    ("UniformUIVec3", *b"Unu3"),
    ("UniformUIVec4", *b"Unu4"),
    ("UniformUInt", *b"Unu1"),
    ("UniformVec2", *b"Unf2"),
    ("UniformVec3", *b"Unf3"),
    ("UniformVec4", *b"Unf4"),
    ("UserSelect", *b"USel"),
    ("UserSwitch", *b"USch"),
    ("VelocityFloat", *b"Vly1"),
    ("VelocityVec2", *b"Vly2"),
    ("VelocityVec3", *b"Vly3"),
    ("VelocityVec4", *b"Vly4"),
];

/// Closed name → tag lookup used to resolve spec node names.
///
/// [`NodeTypeRegistry::builtin`] is the engine's fixed table. Embedders that ship extra node
/// types (or tests) build their own with [`NodeTypeRegistry::from_entries`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeTypeRegistry {
    entries: Vec<(String, NodeType)>,
}

impl NodeTypeRegistry {
    /// The engine's fixed table.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_NODE_TYPES
                .iter()
                .map(|(name, tag)| (*name, NodeType::from_tag(*tag))),
        )
    }

    /// Build a registry from arbitrary entries. Later duplicates replace earlier ones.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, NodeType)>) -> Self {
        let mut out = Self {
            entries: Vec::new(),
        };
        for (name, ty) in entries {
            out.insert(name, ty);
        }
        out
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, name: &str, ty: NodeType) {
        match self.position(name) {
            Ok(i) => self.entries[i].1 = ty,
            Err(i) => self.entries.insert(i, (name.to_owned(), ty)),
        }
    }

    /// Resolve a node name.
    pub fn lookup(&self, name: &str) -> Option<NodeType> {
        self.position(name).ok().map(|i| self.entries[i].1)
    }

    /// Reverse lookup by tag.
    pub fn name_of(&self, ty: NodeType) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, t)| *t == ty)
            .map(|(name, _)| name.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Result<usize, usize> {
        self.entries.binary_search_by(|(n, _)| n.as_str().cmp(name))
    }
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/specs/registry.rs"]
mod tests;
