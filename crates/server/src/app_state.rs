use shared::domain::PropertyInfo;
use view_state::ViewController;

pub(crate) struct AppState {
    pub(crate) view: ViewController,
    pub(crate) property: PropertyInfo,
}
