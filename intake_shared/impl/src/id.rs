use std::fmt::Debug;

use intake_di::Build;
use intake_shared_contracts::id::IdService;
use intake_utils::trace_instrument;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Build)]
pub struct IdServiceImpl;

impl IdService for IdServiceImpl {
    #[trace_instrument(skip(self))]
    fn generate<I: From<Uuid> + Debug + 'static>(&self) -> I {
        Uuid::now_v7().into()
    }
}
