// std
use std::time::Instant;
// self
use crate::{
	_prelude::*,
	obs::{self, FlowKind, FlowOutcome},
};

/// Span plus outcome bookkeeping for one client flow.
///
/// [`run`](FlowSpan::run) and [`in_scope`](FlowSpan::in_scope) record the attempt, execute the
/// flow inside the span, then record the outcome and elapsed time. Without the `tracing` feature
/// the span part compiles away.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	kind: FlowKind,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a span named `oauth2_ataama.flow` tagged with `kind` and the call-site `stage`.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oauth2_ataama.flow", flow = kind.as_str(), stage);

			Self { kind, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self { kind }
		}
	}

	/// Flow kind this span reports under.
	pub fn kind(&self) -> FlowKind {
		self.kind
	}

	/// Runs a synchronous flow inside the span.
	pub fn in_scope<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
		let started = self.start();

		#[cfg(feature = "tracing")]
		let result = self.span.in_scope(f);
		#[cfg(not(feature = "tracing"))]
		let result = f();

		self.finish(started, &result);

		result
	}

	/// Runs an async flow inside the span without holding a guard across `.await` points.
	pub async fn run<T, E, Fut>(&self, fut: Fut) -> Result<T, E>
	where
		Fut: Future<Output = Result<T, E>>,
	{
		let started = self.start();

		#[cfg(feature = "tracing")]
		let result = {
			use tracing::Instrument;

			fut.instrument(self.span.clone()).await
		};
		#[cfg(not(feature = "tracing"))]
		let result = fut.await;

		self.finish(started, &result);

		result
	}

	fn start(&self) -> Instant {
		obs::record_flow_outcome(self.kind, FlowOutcome::Attempt);

		Instant::now()
	}

	fn finish<T, E>(&self, started: Instant, result: &Result<T, E>) {
		let outcome = FlowOutcome::of(result);

		obs::record_flow_outcome(self.kind, outcome);
		obs::record_flow_duration(self.kind, outcome, started.elapsed());
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn in_scope_returns_the_flow_result() {
		let span = FlowSpan::new(FlowKind::AuthorizationUrl, "in_scope_returns_the_flow_result");

		assert_eq!(span.kind(), FlowKind::AuthorizationUrl);
		assert_eq!(span.in_scope(|| Ok::<_, ()>(7)), Ok(7));
		assert_eq!(span.in_scope(|| Err::<(), _>("denied")), Err("denied"));
	}

	#[tokio::test]
	async fn run_preserves_output() {
		let span = FlowSpan::new(FlowKind::AccessToken, "run_preserves_output");
		let value = span.run(async { Ok::<_, ()>(42) }).await;

		assert_eq!(value, Ok(42));
	}
}
