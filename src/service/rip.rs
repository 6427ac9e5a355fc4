use super::ServiceDescriptor;

pub(super) static RIP: ServiceDescriptor =
    ServiceDescriptor::protocol("RIP", "ripd", true, false, &["killall ripd"], &["pidof ripd"]);

pub(super) static RIPNG: ServiceDescriptor = ServiceDescriptor::protocol(
    "RIPNG",
    "ripngd",
    false,
    true,
    &["killall ripngd"],
    &["pidof ripngd"],
);

pub(super) fn rip_global() -> String {
    "\
router rip
  redistribute static
  redistribute connected
  redistribute ospf
  network 0.0.0.0/0
!
"
    .to_string()
}

pub(super) fn ripng_global() -> String {
    "\
router ripng
  redistribute static
  redistribute connected
  redistribute ospf6
  network ::/0
!
"
    .to_string()
}
