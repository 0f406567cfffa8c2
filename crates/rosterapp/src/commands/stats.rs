use crate::stats::Dashboard;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S) -> Dashboard {
    Dashboard::compute(store.list())
}
