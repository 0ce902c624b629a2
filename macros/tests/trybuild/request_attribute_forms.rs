use mediator_core::{HttpOutcome, Mediator, Outcome, Request};
use mediator_macros::Request;

#[derive(Request)]
struct DeleteItem;

#[derive(Request)]
#[request]
struct Ping {}

#[derive(Request)]
#[request(response = String)]
pub struct GetName(pub u32);

#[derive(Request)]
#[request(http)]
struct Logout;

#[derive(Request)]
#[request(http, response = Vec<String>)]
struct ListItems {
    #[allow(dead_code)]
    page: u32,
}

#[derive(Request)]
#[request(response = u64, dispatch = false)]
struct CountItems;

fn assert_output<R: Request<Output = O>, O>() {}

fn main() {
    assert_output::<DeleteItem, Outcome>();
    assert_output::<Ping, Outcome<()>>();
    assert_output::<GetName, Outcome<String>>();
    assert_output::<Logout, HttpOutcome>();
    assert_output::<ListItems, HttpOutcome<Vec<String>>>();
    assert_output::<CountItems, Outcome<u64>>();

    let mediator = Mediator::new(Default::default());
    let _ = DeleteItemDispatch::delete_item(&mediator, DeleteItem);
    let _ = PingDispatch::ping(&mediator, Ping {});
    let _ = GetNameDispatch::get_name(&mediator, GetName(1));
    let _ = LogoutDispatch::logout(&mediator, Logout);
    let _ = ListItemsDispatch::list_items_with_cancellation(
        &mediator,
        ListItems { page: 1 },
        mediator_core::CancellationToken::new(),
    );
}
