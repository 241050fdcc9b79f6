//! # Mock Framework
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of an actor. Use it to drive an actor under
//! test whose dependencies are other actors, e.g. a cart actor whose catalog is a
//! mocked product client:
//!
//! ```rust,ignore
//! let mut products = MockClient::<ProductRecord>::new();
//! products.expect_action(ProductId(1)).return_ok(Stock { id: ProductId(1), amount: 5 });
//! let catalog = ProductClient::new(products.client());
//! // ... run the cart actor with `catalog` in its context ...
//! products.verify();
//! ```
//!
//! For lower-level tests, [`create_mock_client`] returns the raw receiver and
//! [`expect_action`] / [`expect_get`] pop the next request off it.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

fn answer<T: ActorEntity, R>(
    state: &Shared<T>,
    respond_to: Response<R>,
    outcome: Result<Result<R, FrameworkError>, String>,
) {
    match outcome {
        Ok(response) => {
            let _ = respond_to.send(response);
        }
        Err(failure) => {
            // Dropping the responder surfaces as ActorDropped at the call site.
            if let Ok(mut state) = state.lock() {
                state.failures.push(failure);
            }
        }
    }
}

/// A mock client with ordered expectations.
///
/// Requests must arrive in the order the expectations were registered and target
/// the expected ID. Mismatches are answered by dropping the reply channel and are
/// reported by [`MockClient::verify`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: Shared<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = task_state
                    .lock()
                    .ok()
                    .and_then(|mut state| state.expectations.pop_front());
                let kind = request.kind();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        let outcome = if id == expected {
                            Ok(response)
                        } else {
                            Err(format!("get: expected id {expected}, got {id}"))
                        };
                        answer(&task_state, respond_to, outcome);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => answer(&task_state, respond_to, Ok(response)),
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        let outcome = if id == expected {
                            Ok(response)
                        } else {
                            Err(format!("action: expected id {expected}, got {id}"))
                        };
                        answer(&task_state, respond_to, outcome);
                    }
                    (_, next) => {
                        let failure = match next {
                            Some(_) => format!("unexpected {kind} request: expectation mismatch"),
                            None => format!("unexpected {kind} request: no expectation left"),
                        };
                        if let Ok(mut state) = task_state.lock() {
                            state.failures.push(failure);
                        }
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        if let Ok(mut state) = self.state.lock() {
            state.expectations.push_back(expectation);
        }
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<'_, T> {
        GetExpectationBuilder { mock: self, id }
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<'_, T> {
        CreateExpectationBuilder { mock: self }
    }

    /// Expects an `action` on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<'_, T> {
        ActionExpectationBuilder { mock: self, id }
    }

    /// Panics unless every expectation was consumed and no request mismatched.
    pub fn verify(&self) {
        let state = self.state.lock().expect("mock state poisoned");
        if !state.failures.is_empty() {
            panic!("Mock received unexpected requests: {:?}", state.failures);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<'a, T: ActorEntity> {
    mock: &'a MockClient<T>,
    id: T::Id,
}

impl<T: ActorEntity> GetExpectationBuilder<'_, T> {
    pub fn return_ok(self, value: Option<T>) {
        self.mock.push(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.mock.push(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<'a, T: ActorEntity> {
    mock: &'a MockClient<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<'_, T> {
    pub fn return_ok(self, id: T::Id) {
        self.mock.push(Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.mock.push(Expectation::Create {
            response: Err(error),
        });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<'a, T: ActorEntity> {
    mock: &'a MockClient<T>,
    id: T::Id,
}

impl<T: ActorEntity> ActionExpectationBuilder<'_, T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.mock.push(Expectation::Action {
            id: self.id,
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.mock.push(Expectation::Action {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Creates a client and the receiver its requests land on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Pops the next request if it is a `get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is an `action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
