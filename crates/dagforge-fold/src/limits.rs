/// Safety valve for `fold`'s frame stack, mirroring the
/// construct-limits-then-pass-them-to-the-executing-call shape common
/// to this lineage's runtime components. The default is far above any
/// graph this framework expects to see in practice; it exists to turn
/// a cyclic `children` list that slipped past `commit` into a clean
/// error instead of unbounded heap growth.
#[derive(Clone, Copy, Debug)]
pub struct FoldLimits {
    max_frame_depth: usize,
}

impl FoldLimits {
    pub fn max_frame_depth(mut self, n: usize) -> Self {
        self.max_frame_depth = n;
        self
    }

    pub fn get_max_frame_depth(&self) -> usize {
        self.max_frame_depth
    }
}

impl Default for FoldLimits {
    fn default() -> Self {
        FoldLimits { max_frame_depth: 1_000_000 }
    }
}
