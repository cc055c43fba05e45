pub const TITLE: &str = "Rest Countries";

pub const PROMPT: &str = "> ";

pub const HELP_TEXT: &str = "\
Commands:
  sort                       toggle Ascending/Descending
  filter all|oceania|small   show everything, Oceania only, or countries
                             smaller than Lithuania
  page <n>                   jump to page n
  help                       show this help
  quit                       exit";
