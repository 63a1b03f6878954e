use tasklet_core::Task;
use uuid::Uuid;
use web_sys::{
  HtmlInputElement,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_node_ref
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:      Task,
  pub on_toggle: Callback<Uuid>,
  pub on_edit:
    Callback<(Uuid, Option<String>)>,
  pub on_remove: Callback<Uuid>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.task.id;
  let editing = props.task.is_editing;
  let input_ref = use_node_ref();

  let title_class = classes!(
    "task__title",
    props
      .task
      .is_completed
      .then_some("completed")
  );

  let title = if editing {
    html! {
        <input
            class={title_class}
            type="text"
            value={props.task.title.clone()}
            ref={input_ref.clone()}
        />
    }
  } else {
    html! {
        <span class={title_class}>{ &props.task.title }</span>
    }
  };

  let on_toggle = {
    let on_toggle =
      props.on_toggle.clone();
    Callback::from(move |_| {
      on_toggle.emit(id)
    })
  };

  // The draft is read from the live input at click time.
  let on_edit = {
    let on_edit = props.on_edit.clone();
    Callback::from(move |_| {
      let draft = if editing {
        input_ref
          .cast::<HtmlInputElement>()
          .map(|input| input.value())
      } else {
        None
      };
      on_edit.emit((id, draft));
    })
  };

  let on_remove = {
    let on_remove =
      props.on_remove.clone();
    Callback::from(move |_| {
      on_remove.emit(id)
    })
  };

  let edit_action = if editing {
    RowAction::Commit
  } else {
    RowAction::Edit
  };

  html! {
      <li id={id.to_string()} class="task">
          { title }
          { action_button(RowAction::Toggle, on_toggle) }
          { action_button(edit_action, on_edit) }
          { action_button(RowAction::Remove, on_remove) }
      </li>
  }
}

/// Row buttons, drawn as text glyphs so the bundle ships no image assets.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
enum RowAction {
  Toggle,
  Edit,
  Commit,
  Remove
}

impl RowAction {
  fn glyph(self) -> &'static str {
    match self {
      | RowAction::Toggle => "\u{2713}",
      | RowAction::Edit => "\u{270E}",
      | RowAction::Commit => "\u{21B5}",
      | RowAction::Remove => "\u{2715}"
    }
  }

  fn label(self) -> &'static str {
    match self {
      | RowAction::Toggle => {
        "Toggle completion"
      }
      | RowAction::Edit => "Edit title",
      | RowAction::Commit => "Save title",
      | RowAction::Remove => "Remove task"
    }
  }
}

fn action_button(
  action: RowAction,
  onclick: Callback<MouseEvent>
) -> Html {
  html! {
      <button
          class="task__action"
          type="button"
          title={action.label()}
          aria-label={action.label()}
          {onclick}
      >
          <span class="task__glyph" aria-hidden="true">
              { action.glyph() }
          </span>
      </button>
  }
}
