use web_sys::{
  HtmlInputElement,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_node_ref
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub on_submit: Callback<String>
}

/// New-task input. Emits the raw text; blank input is left in place so the
/// caller can ignore it.
#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let input_ref = use_node_ref();

  let onsubmit = {
    let input_ref = input_ref.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        let Some(input) = input_ref
          .cast::<HtmlInputElement>()
        else {
          tracing::warn!(
            "task form input is not \
             mounted"
          );
          return;
        };

        let raw = input.value();
        if !raw.trim().is_empty() {
          input.set_value("");
        }
        on_submit.emit(raw);
      }
    )
  };

  html! {
      <form id="form" class="form" onsubmit={onsubmit}>
          <input
              id="form-input"
              class="form__input"
              type="text"
              placeholder="What needs doing?"
              ref={input_ref}
          />
          <button class="form__submit" type="submit">{ "Add" }</button>
      </form>
  }
}
