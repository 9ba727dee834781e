//! Loading and error scaffolding for unguarded network calls.

use crate::domain::models::extension_of;

const TYPED_HELPER: &str = r"
export interface RequestState<T> {
  loading: boolean;
  error: string | null;
  data: T | null;
}

export const initialRequestState: RequestState<never> = { loading: false, error: null, data: null };

export async function withRequestState<T>(request: () => Promise<T>): Promise<RequestState<T>> {
  try {
    const data = await request();
    return { loading: false, error: null, data };
  } catch (err) {
    const message = err instanceof Error ? err.message : String(err);
    return { loading: false, error: message, data: null };
  }
}
";

const UNTYPED_HELPER: &str = r"
export const initialRequestState = { loading: false, error: null, data: null };

export async function withRequestState(request) {
  try {
    const data = await request();
    return { loading: false, error: null, data };
  } catch (err) {
    const message = err instanceof Error ? err.message : String(err);
    return { loading: false, error: message, data: null };
  }
}
";

/// Append a `RequestState` helper to scripts that call `fetch(` or `axios.`
/// without handling any rejection.
pub(super) fn add_request_state(path: &str, content: &str) -> Option<String> {
    let helper = match extension_of(path).as_str() {
        "ts" | "tsx" => TYPED_HELPER,
        "js" | "jsx" => UNTYPED_HELPER,
        _ => return None,
    };

    let calls_network = content.contains("fetch(") || content.contains("axios.");
    if !calls_network || content.contains("catch") {
        return None;
    }

    let mut out = content.trim_end().to_string();
    out.push('\n');
    out.push_str(helper);
    Some(out)
}
