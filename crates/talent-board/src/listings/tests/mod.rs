mod common;
mod intake;
mod invitations;
mod routing;
mod view;
