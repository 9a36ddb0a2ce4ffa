use std::sync::Arc;
use std::time::Duration;

use dioxus::core::{Mutations, NoOpMutations};
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::time::fixed_now;
use services::{Clock, QuizLoopService};
use storage::repository::{QuestionRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::vm::QuizIntent;
use crate::views::quiz::QuizTestHandles;

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Send an intent through the view's dispatcher and re-render.
    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Like [`ViewHarness::dispatch`], returning the edits the re-render produced.
    pub fn dispatch_with_edits(&mut self, intent: QuizIntent) -> Mutations {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.dom.process_events();
        let edits = self.dom.render_immediate_to_vec();
        self.dom.process_events();
        edits
    }

    pub fn elapsed_secs(&self) -> Option<u32> {
        let driver = self.handles.driver();
        self.dom.in_runtime(|| {
            driver
                .read()
                .as_ref()
                .map(|active| active.session().elapsed().secs())
        })
    }

    /// Drive until the quiz has started and rendered.
    pub async fn wait_until_ready(&mut self) {
        for _ in 0..20 {
            self.drive_async().await;
            if self.render().contains("quiz-card") {
                return;
            }
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Ticks are an hour apart so rendered times stay at zero unless a test asks otherwise.
pub const SLOW_TICK: Duration = Duration::from_secs(3_600);

pub fn setup_view_harness() -> ViewHarness {
    let storage = Storage::bundled().expect("bundled storage");
    setup_view_harness_with_repo(Arc::clone(&storage.questions), SLOW_TICK)
}

pub fn setup_view_harness_with_repo(
    questions: Arc<dyn QuestionRepository>,
    tick_period: Duration,
) -> ViewHarness {
    let quiz_loop = Arc::new(
        QuizLoopService::new(Clock::fixed(fixed_now()), questions).with_tick_period(tick_period),
    );
    let handles = QuizTestHandles::default();
    let app = Arc::new(TestApp { quiz_loop });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, handles }
}
