use super::{AsSingleTargets, DatasetBase, Records};
use ndarray::{ArrayBase, ArrayView1, Data, Ix1};

/// A one-dimensional NdArray can act as single target
impl<F, D: Data<Elem = F>> AsSingleTargets for ArrayBase<D, Ix1> {
    type Elem = F;

    fn as_single_targets(&self) -> ArrayView1<F> {
        self.view()
    }
}

/// A dataset forwards to its targets
impl<R: Records, T: AsSingleTargets> AsSingleTargets for DatasetBase<R, T> {
    type Elem = T::Elem;

    fn as_single_targets(&self) -> ArrayView1<Self::Elem> {
        self.targets.as_single_targets()
    }
}
