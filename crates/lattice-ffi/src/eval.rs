//! In-place homomorphic evaluation

use crate::ciphertext::Ciphertext;
use crate::context::Context;
use crate::engine::Engine;
use crate::error::{FfiError, FfiResult, HandleKind};

impl<E: Engine> Context<E> {
    /// Homomorphically add `other` into `acc` (acc = acc + other).
    ///
    /// `other` is left unchanged. The borrow rules keep `acc` and `other`
    /// from being the same ciphertext.
    pub fn eval_add(&self, acc: &mut Ciphertext<'_, E>, other: &Ciphertext<'_, E>) -> FfiResult<()> {
        const OP: &str = "eval_add";
        let raw = self.raw(OP)?;
        let other_raw = other.raw(OP)?;
        self.warn_if_foreign(acc.context(), HandleKind::Ciphertext, OP);
        self.warn_if_foreign(other.context(), HandleKind::Ciphertext, OP);
        let acc_raw = acc.raw_mut(OP)?;

        if self.engine().eval_add_in_place(raw, acc_raw, other_raw) {
            Ok(())
        } else {
            Err(FfiError::Evaluation { op: OP })
        }
    }

    /// Add every addend into `acc`, in order.
    ///
    /// All handles are checked before the first addition, so an invalid
    /// addend leaves `acc` untouched. Additions are not transactional: if the
    /// engine fails partway, `acc` keeps the sum of the addends before the
    /// failing one.
    pub fn eval_add_all(
        &self,
        acc: &mut Ciphertext<'_, E>,
        addends: &[&Ciphertext<'_, E>],
    ) -> FfiResult<()> {
        const OP: &str = "eval_add_all";
        self.raw(OP)?;
        acc.raw(OP)?;
        for addend in addends {
            addend.raw(OP)?;
        }

        for addend in addends {
            self.eval_add(acc, addend)?;
        }
        Ok(())
    }
}
